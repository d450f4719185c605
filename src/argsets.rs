use std::path::PathBuf;

#[derive(Debug)]
pub struct PushCsvArgs {
    pub node_name: String,
    pub csv_path: PathBuf,
    pub realtime: bool,
    pub profile: Option<String>,
}
