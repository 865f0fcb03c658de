pub mod abstract_trait;
pub mod cache;
pub mod di;
pub mod middleware;
pub mod service;
pub mod state;

#[cfg(test)]
mod test_support;
