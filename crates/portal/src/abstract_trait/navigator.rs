use std::sync::Arc;

pub type DynNavigator = Arc<dyn Navigator + Send + Sync>;

/// Issues client-side navigations on behalf of the route guard.
pub trait Navigator {
    fn navigate(&self, path: &str);
}
