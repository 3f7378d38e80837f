// 会话缓存模块
// 包含键值存储抽象和会话的持久化读写

pub mod keys;
pub mod operations;
pub mod storage;

// 重新导出常用类型，方便其他模块使用
pub use operations::session::{CachedSession, SessionCacheOperations};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
