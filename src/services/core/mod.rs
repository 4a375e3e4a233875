pub mod operation_lock;

pub use operation_lock::OperationLock;
