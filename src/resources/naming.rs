//! Resource naming conventions.

/// Builds standardized resource names and DNS labels for one stack.
#[derive(Debug, Clone)]
pub struct ResourceNamer {
    stack_name: String,
    resource_name: String,
}

impl ResourceNamer {
    pub fn new(stack_name: &str, resource_name: &str) -> ResourceNamer {
        ResourceNamer {
            stack_name: stack_name.to_string(),
            resource_name: resource_name.to_string(),
        }
    }

    /// Standardized resource name: `{stack}-{name}-{suffix}`.
    pub fn resource_name(&self, suffix: &str) -> String {
        format!("{}-{}-{}", self.stack_name, self.resource_name, suffix)
    }

    /// Standardized DNS label: `{prefix}{stack}`.
    ///
    /// DNS labels may not contain hyphens, so the stack name is used as-is
    /// and is expected to be label-safe.
    pub fn dns_label(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.stack_name)
    }

    /// Display name for the component itself: `{stack}-{name}`.
    pub fn display_name(&self) -> String {
        format!("{}-{}", self.stack_name, self.resource_name)
    }
}
