use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) =
            std::env::var("DATAWISE_API_URL").or_else(|_| std::env::var("API_URL"))
            && !url.is_empty()
        {
            self.api_url = url;
        }

        if let Ok(dir) = std::env::var("DATAWISE_STORAGE_DIR")
            && !dir.is_empty()
        {
            self.storage_dir = dir;
        }
    }
}
