/// Settings of a [`Root`](crate::Root).
#[derive(Clone, Debug)]
pub struct RootConfig {
    /// Property receiving the synthetic positional key of every node.
    pub key_attribute: String,
    /// Reject malformed buffers before reconstruction. With validation off,
    /// unbalanced buffers are reconstructed as recorded.
    pub validate: bool,
    /// Deepest nesting accepted, counted in parent levels.
    pub max_depth: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            key_attribute: "key".to_string(),
            validate: true,
            max_depth: 256,
        }
    }
}
