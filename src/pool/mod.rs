pub use pool::Pool;

mod pool;
