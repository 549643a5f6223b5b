pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_MIRROR_PATH: &str = "votes.json";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const INDEX_FILE: &str = "index.html";
