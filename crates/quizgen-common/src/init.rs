//! One-time environment bootstrap

use std::sync::Once;

static INIT: Once = Once::new();

/// Load `.env` overrides before any configuration is read.
///
/// Safe to call from multiple entry points; only the first call does work.
pub fn initialize_environment() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_a_no_op() {
        initialize_environment();
        initialize_environment();
    }
}
