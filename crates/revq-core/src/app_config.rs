use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub gemini_api_key: String,
    pub generation_model: String,
    pub embedding_model: String,
    pub pinecone_api_key: String,
    pub pinecone_index_host: String,
    pub classification_buckets: String,
    pub llm_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .field("generation_model", &self.generation_model)
            .field("embedding_model", &self.embedding_model)
            .field("pinecone_api_key", &"[redacted]")
            .field("pinecone_index_host", &self.pinecone_index_host)
            .field("classification_buckets", &self.classification_buckets)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
