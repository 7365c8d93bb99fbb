/// Process-wide configuration, built once at startup and passed by reference
/// to every stage. There are no module-level client handles; anything that
/// needs a credential receives it from here.
#[derive(Clone)]
pub struct AppConfig {
    /// Supabase project URL, e.g. `https://abc123.supabase.co`.
    pub supabase_url: String,
    /// Supabase service-role key. Bypasses row-level security; treat as a
    /// production credential.
    pub supabase_key: String,
    pub r2_account_id: String,
    pub r2_access_key: String,
    pub r2_secret_key: String,
    /// Upstream price-watch listing endpoint.
    pub feed_url: String,
    /// User-Agent sent to the feed; the endpoint rejects obvious bot agents.
    pub feed_user_agent: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"[redacted]")
            .field("r2_account_id", &self.r2_account_id)
            .field("r2_access_key", &"[redacted]")
            .field("r2_secret_key", &"[redacted]")
            .field("feed_url", &self.feed_url)
            .field("feed_user_agent", &self.feed_user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
