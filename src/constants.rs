/// Source and cache locations for the Montpellier defibrillator registry
pub const DEFAULT_SOURCE_URL: &str =
    "https://data.montpellier3m.fr/sites/default/files/ressources/MMM_MMM_DAE.csv";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATA_FILE: &str = "MMM_MMM_DAE.csv";

/// Default path of the cached registry export
pub fn default_data_path() -> String {
    format!("{}/{}", DEFAULT_DATA_DIR, DEFAULT_DATA_FILE)
}

// CSV headers of the registry export
pub const HEADER_ID: &str = "gid";
pub const HEADER_NAME: &str = "nom";
pub const HEADER_LATITUDE: &str = "lat_coor1";
pub const HEADER_LONGITUDE: &str = "long_coor1";
pub const HEADER_ADDRESS_NUMBER: &str = "adr_num";
pub const HEADER_STREET_NAME: &str = "adr_voie";
pub const HEADER_POSTAL_CODE: &str = "com_cp";
pub const HEADER_CITY_NAME: &str = "com_nom";
pub const HEADER_PHONE: &str = "tel1";
pub const HEADER_MAINTENANCE_FREQUENCY: &str = "freq_mnt";
pub const HEADER_LAST_MAINTENANCE_DATE: &str = "dermnt";

/// The dataset covers a single municipality
pub const CITY_NAME: &str = "Montpellier";

/// Every present maintenance frequency collapses to this phrase
pub const MAINTENANCE_FREQUENCY: &str = "tous les ans";

/// Environment overrides
pub const ENV_SOURCE_URL: &str = "DAE_SOURCE_URL";
pub const ENV_DATA_DIR: &str = "DAE_DATA_DIR";

pub const CONFIG_FILE: &str = "dae_registry.toml";
