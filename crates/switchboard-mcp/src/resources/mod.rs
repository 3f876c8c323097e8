//! Built-in resources and resource templates.

pub mod files;
pub mod roots;
pub mod server_info;

use std::sync::Arc;

use switchboard::RegistryBuilder;

use crate::config::ServerConfig;

pub fn register(builder: RegistryBuilder, config: &ServerConfig) -> RegistryBuilder {
    let roots = Arc::new(config.roots.clone());
    let summary = Arc::new(server_info::ServerSummary::new(config));

    builder
        .resource(server_info::info(), move || {
            server_info::read(Arc::clone(&summary))
        })
        .template(roots::info(), {
            let roots = Arc::clone(&roots);
            move |vars| roots::read(Arc::clone(&roots), vars)
        })
        .template(files::info(), move |vars| files::read(Arc::clone(&roots), vars))
}
