//! Reset command implementation

use tracing::info;

use crate::config::AppConfig;
use crate::store::SessionStore;
use crate::Result;

/// Run the reset command
pub fn run(config: &AppConfig) -> Result<()> {
    if SessionStore::new(config).clear()? {
        info!(class = %config.class_name, "Session discarded");
        println!("Session for {} reset.", config.class_name);
    } else {
        println!("No session for {}.", config.class_name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::prepare::prepare_session;
    use crate::commands::test_support::config_in;

    #[test]
    fn test_reset_removes_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        prepare_session(&config).unwrap();
        run(&config).unwrap();
        assert!(!SessionStore::new(&config).exists());
        run(&config).unwrap();
    }
}
