// src/services/cache.rs
// Cache de respostas (só Processo usa). Falhas são logadas e engolidas: o cache nunca derruba uma requisição.

use async_trait::async_trait;
use redis::aio::ConnectionManager;

#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64);
    async fn delete(&self, key: &str);
    async fn delete_pattern(&self, pattern: &str);
}

/// Cache desligado (sem REDIS_URL).
#[derive(Clone, Default)]
pub struct NoopCache;

#[async_trait]
impl ResponseCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }
    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) {}
    async fn delete(&self, _key: &str) {}
    async fn delete_pattern(&self, _pattern: &str) {}
}

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

const SCAN_BATCH_SIZE: usize = 100;

#[async_trait]
impl ResponseCache for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match redis::cmd("GET").arg(key).query_async::<Option<String>>(&mut conn).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("⚠️ Falha ao ler do cache ({}): {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) {
        let mut conn = self.conn.clone();
        let result = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<()>(&mut conn)
            .await;
        if let Err(e) = result {
            tracing::warn!("⚠️ Falha ao gravar no cache ({}): {}", key, e);
        }
    }

    async fn delete(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = redis::cmd("DEL").arg(key).query_async::<()>(&mut conn).await {
            tracing::warn!("⚠️ Falha ao invalidar o cache ({}): {}", key, e);
        }
    }

    async fn delete_pattern(&self, pattern: &str) {
        // SCAN em lotes em vez de KEYS, para não bloquear o Redis
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        loop {
            let scanned = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async::<(u64, Vec<String>)>(&mut conn)
                .await;

            let (next_cursor, keys) = match scanned {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("⚠️ Falha ao varrer o cache ({}): {}", pattern, e);
                    return;
                }
            };

            if !keys.is_empty() {
                if let Err(e) = redis::cmd("DEL").arg(&keys).query_async::<()>(&mut conn).await {
                    tracing::warn!("⚠️ Falha ao invalidar o cache ({}): {}", pattern, e);
                    return;
                }
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }
    }
}
