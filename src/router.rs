use std::sync::Arc;

use url::form_urlencoded;

use crate::session::UserSession;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// 路由的访问策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// 需要登录
    pub requires_auth: bool,
    /// 仅限未登录用户（登录、注册页）
    pub guest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub meta: RouteMeta,
}

impl Route {
    pub fn open(path: &str) -> Self {
        Self {
            path: path.to_string(),
            meta: RouteMeta::default(),
        }
    }

    pub fn requires_auth(path: &str) -> Self {
        Self {
            path: path.to_string(),
            meta: RouteMeta {
                requires_auth: true,
                guest: false,
            },
        }
    }

    pub fn guest(path: &str) -> Self {
        Self {
            path: path.to_string(),
            meta: RouteMeta {
                requires_auth: false,
                guest: true,
            },
        }
    }
}

/// 路由表
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            Route::open(HOME_PATH),
            Route::open("/topics"),
            Route::open("/practice"),
            Route::requires_auth("/profile"),
            Route::open("/ai-assistant"),
            Route::guest(LOGIN_PATH),
            Route::guest("/register"),
        ])
    }
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// 按路径查找策略，未声明的路径没有限制
    pub fn meta_for(&self, path: &str) -> RouteMeta {
        self.routes
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.meta)
            .unwrap_or_default()
    }
}

/// 导航目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// 完整路径，包含查询串和片段
    pub full_path: String,
}

impl NavigationTarget {
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
        }
    }

    /// 去掉查询串和片段后的路径
    pub fn path(&self) -> &str {
        let end = self
            .full_path
            .find(['?', '#'])
            .unwrap_or(self.full_path.len());
        &self.full_path[..end]
    }
}

/// 一次导航的结果，三者必居其一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Allow,
    /// 跳转登录页，登录后回到 `redirect`
    RedirectToLogin { redirect: String },
    RedirectToHome,
}

impl NavigationOutcome {
    /// 最终要进入的地址；`Allow` 时为 `None`
    pub fn location(&self) -> Option<String> {
        match self {
            NavigationOutcome::Allow => None,
            NavigationOutcome::RedirectToLogin { redirect } => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("redirect", redirect)
                    .finish();
                Some(format!("{}?{}", LOGIN_PATH, query))
            }
            NavigationOutcome::RedirectToHome => Some(HOME_PATH.to_string()),
        }
    }
}

/// 路由守卫，每次导航前检查登录状态
#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: RouteTable,
    session: Arc<UserSession>,
}

impl RouteGuard {
    pub fn new(table: RouteTable, session: Arc<UserSession>) -> Self {
        Self { table, session }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn before_each(&self, to: &NavigationTarget) -> NavigationOutcome {
        let meta = self.table.meta_for(to.path());
        let logged_in = self.session.is_logged_in();

        let outcome = if meta.requires_auth && !logged_in {
            NavigationOutcome::RedirectToLogin {
                redirect: to.full_path.clone(),
            }
        } else if meta.guest && logged_in {
            NavigationOutcome::RedirectToHome
        } else {
            NavigationOutcome::Allow
        };

        tracing::debug!("Navigation to {} -> {:?}", to.full_path, outcome);
        outcome
    }
}
