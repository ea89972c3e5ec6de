use figment::providers::{Data, Format, Json, Toml};
use figment::value::{Dict, Map};
use figment::{Metadata, Profile, Provider};
use std::path::Path;

/// Configuration file provider that picks its format from the file extension
///
/// `.json` files are read as JSON; everything else is read as TOML. Missing
/// files contribute nothing, like figment's own file providers.
pub fn auto<P: AsRef<Path>>(path: P) -> SmartProvider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => SmartProvider::Json(Json::file(path)),
        _ => SmartProvider::Toml(Toml::file(path)),
    }
}

pub enum SmartProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
}

impl Provider for SmartProvider {
    fn metadata(&self) -> Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert!(matches!(auto("settings.json"), SmartProvider::Json(_)));
        assert!(matches!(auto("settings.JSON"), SmartProvider::Json(_)));
        assert!(matches!(auto("keysweep.toml"), SmartProvider::Toml(_)));
        assert!(matches!(auto("no-extension"), SmartProvider::Toml(_)));
    }
}
