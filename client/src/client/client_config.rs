use std::default::Default;

/// Contains Config properties which will be used by the Client
#[derive(Clone)]
pub struct ClientConfig {
    /// When a patch arrives for an entity component the Client has never
    /// seen, create it from the schema's defaults instead of rejecting it
    pub auto_instantiate: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auto_instantiate: true,
        }
    }
}
