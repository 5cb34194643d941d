use anyhow::Result;
use once_cell::sync::Lazy;
use speechswap::infrastructure::db::DbPool;
use speechswap::infrastructure::repositories::SentenceCacheRepository;
use speechswap::{EncodedAudio, PlaybackService, TtsService};
use std::sync::Arc;


use mocks::{MockSession, MockTtsGateway};

// Tracing output for failing tests; silent unless RUST_LOG is set or a
// test fails under --nocapture.
static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("speechswap=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .ok();
});

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// The services under test plus handles to the seams around them.
///
/// `service` is the playback entry point; `tts`, `cache` and `pool` allow
/// tests to poke at the layers underneath it directly.
pub struct TestContext {
    pub service: PlaybackService,
    pub tts: Arc<TtsService>,
    pub session: Arc<MockSession>,
    pub gateway: Arc<MockTtsGateway>,
    pub cache: Arc<SentenceCacheRepository>,
    #[allow(dead_code)]
    pub pool: DbPool,
}

impl TestContext {
    /// Context over a fresh in-memory database, no generation retries.
    pub async fn new(gateway: MockTtsGateway) -> Result<Self> {
        let pool = db_pool::memory_pool().await?;
        Ok(Self::with_pool(gateway, pool, 0))
    }

    /// Context over a fresh in-memory database with generation retries.
    pub async fn with_retries(gateway: MockTtsGateway, retries: u32) -> Result<Self> {
        let pool = db_pool::memory_pool().await?;
        Ok(Self::with_pool(gateway, pool, retries))
    }

    /// Context over a caller-provided database.
    pub fn with_pool(gateway: MockTtsGateway, pool: DbPool, retries: u32) -> Self {
        init_tracing();

        let gateway = Arc::new(gateway);
        let cache = Arc::new(SentenceCacheRepository::new(Arc::new(pool.clone())));
        let tts = Arc::new(TtsService::new(cache.clone(), gateway.clone(), retries));
        let session = Arc::new(MockSession::inactive());
        let service = PlaybackService::new(session.clone(), tts.clone(), fixtures::test_profiles());

        Self {
            service,
            tts,
            session,
            gateway,
            cache,
            pool,
        }
    }

    /// Put the session into an active study state.
    pub fn study(&self, language: &str, sentence: &str) {
        self.session.set_language(Some(language));
        self.session.set_sentence(Some(sentence));
    }
}

// Helper to compute the data URL an audio payload is played from
pub fn data_url(bytes: &[u8]) -> String {
    EncodedAudio::encode(bytes).data_url()
}
