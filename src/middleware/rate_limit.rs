// src/middleware/rate_limit.rs

use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::common::error::AppError;

/// Uma janela de limite: no máximo `limit` requisições por IP a cada `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleTier {
    pub name: &'static str,
    pub limit: usize,
    pub window: Duration,
}

/// Janelas aplicadas a todas as rotas; a requisição passa só se nenhuma estourar.
pub const DEFAULT_TIERS: [ThrottleTier; 3] = [
    ThrottleTier {
        name: "short",
        limit: 3,
        window: Duration::from_secs(1),
    },
    ThrottleTier {
        name: "medium",
        limit: 30,
        window: Duration::from_secs(10),
    },
    ThrottleTier {
        name: "long",
        limit: 105,
        window: Duration::from_secs(60),
    },
];

// Acima disso, a cada requisição os IPs sem acesso recente são descartados
const SWEEP_THRESHOLD: usize = 10_000;

/// Limitador em memória com janela deslizante, por IP.
#[derive(Debug)]
pub struct RateLimiter {
    tiers: Vec<ThrottleTier>,
    horizon: Duration,
    hits: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(tiers: &[ThrottleTier]) -> Self {
        let horizon = tiers.iter().map(|t| t.window).max().unwrap_or_default();
        Self {
            tiers: tiers.to_vec(),
            horizon,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Registra a requisição. Se alguma janela já estiver cheia, devolve essa janela e nada é registrado.
    pub fn check(&self, ip: IpAddr) -> Result<(), ThrottleTier> {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), ThrottleTier> {
        let mut hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);

        if hits.len() > SWEEP_THRESHOLD {
            let horizon = self.horizon;
            hits.retain(|_, seen| seen.iter().any(|&t| now.duration_since(t) < horizon));
        }

        let seen = hits.entry(ip).or_default();
        seen.retain(|&t| now.duration_since(t) < self.horizon);

        for tier in &self.tiers {
            let in_window = seen
                .iter()
                .filter(|&&t| now.duration_since(t) < tier.window)
                .count();
            if in_window >= tier.limit {
                return Err(*tier);
            }
        }

        seen.push(now);
        Ok(())
    }
}

/// IP do cliente: `X-Forwarded-For` (primeiro da cadeia), `X-Real-IP` e, por fim, a conexão.
fn client_ip(request: &Request) -> Option<IpAddr> {
    let from_header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    from_header("x-forwarded-for")
        .or_else(|| from_header("x-real-ip"))
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip())
        })
}

/// Middleware global de limite de requisições; estouro vira 429 no formato de erro padrão.
pub async fn throttle(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(ip) = client_ip(&request) else {
        tracing::debug!("IP do cliente desconhecido; requisição segue sem limite");
        return next.run(request).await;
    };

    match limiter.check(ip) {
        Ok(()) => next.run(request).await,
        Err(tier) => {
            tracing::warn!("🚦 Limite '{}' excedido por {}", tier.name, ip);
            let mut response = AppError::TooManyRequests.into_response();
            if let Ok(value) = HeaderValue::from_str(&tier.window.as_secs().max(1).to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http};

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    #[test]
    fn short_window_blocks_the_fourth_request_in_a_second() {
        let limiter = RateLimiter::new(&DEFAULT_TIERS);
        let start = Instant::now();

        for i in 0..3 {
            assert!(limiter.check_at(ip(1), start + Duration::from_millis(i * 100)).is_ok());
        }
        let blocked = limiter.check_at(ip(1), start + Duration::from_millis(500));
        assert_eq!(blocked.unwrap_err().name, "short");

        // Passado o segundo, volta a aceitar
        assert!(limiter.check_at(ip(1), start + Duration::from_millis(1_100)).is_ok());
    }

    #[test]
    fn medium_window_counts_independently_of_the_short_one() {
        let limiter = RateLimiter::new(&DEFAULT_TIERS[1..]);
        let start = Instant::now();

        for i in 0..30 {
            assert!(limiter.check_at(ip(2), start + Duration::from_millis(i * 100)).is_ok(), "{i}");
        }
        let blocked = limiter.check_at(ip(2), start + Duration::from_millis(3_100));
        assert_eq!(blocked.unwrap_err().name, "medium");

        // A primeira requisição sai da janela de 10 s
        assert!(limiter.check_at(ip(2), start + Duration::from_millis(10_050)).is_ok());
    }

    #[test]
    fn each_ip_has_its_own_budget() {
        let limiter = RateLimiter::new(&DEFAULT_TIERS);
        let now = Instant::now();

        for _ in 0..3 {
            limiter.check_at(ip(3), now).unwrap();
        }
        assert!(limiter.check_at(ip(3), now).is_err());
        assert!(limiter.check_at(ip(4), now).is_ok());
    }

    #[test]
    fn client_ip_prefers_forwarded_header() {
        let request = http::Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), Some(IpAddr::from([203, 0, 113, 7])));

        let request = http::Request::builder()
            .header("x-real-ip", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), Some(IpAddr::from([198, 51, 100, 2])));

        let request = http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), None);
    }
}
