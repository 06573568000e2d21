use anyhow::Result;

use crate::core::installer::extract_install_dir;

/// Prints the install directory found in a service command line. Exits with
/// status 1 and prints nothing when there is none.
pub fn install_dir(service_cmd: Option<&str>) -> Result<()> {
    match extract_install_dir(service_cmd) {
        Some(dir) => {
            println!("{}", dir);
            Ok(())
        }
        None => {
            log::debug!("no --config-dir in service command line");
            std::process::exit(1);
        }
    }
}
