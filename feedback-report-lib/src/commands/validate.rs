use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use std::io::Write;

/// Load the configuration the other commands would use and report whether it is valid
pub fn validate_config<H: Host>(host: &mut H, common_args: &CommonArgs) -> Result<()> {
    match Common::new(common_args) {
        Ok(common) => {
            let _ = writeln!(host.output(), "Configuration is valid");
            match &common_args.config {
                Some(path) => {
                    let _ = writeln!(host.output(), "Config file: {path}");
                }
                None => {
                    let _ = writeln!(host.output(), "Data directory: {}", common.data_dir);
                }
            }
            let _ = writeln!(
                host.output(),
                "Table: {} (partition {}), bucket: {}, page size: {}",
                common.config.table_name,
                common.config.partition_key,
                common.config.reports_bucket,
                common.config.default_page_size
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
