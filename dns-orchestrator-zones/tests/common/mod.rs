//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use dns_orchestrator_zones::{ZonesClient, ZonesConfig, create_zones_client};
use serde_json::{Value, json};

pub const TEST_TOKEN: &str = "test-token";
pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const ACCOUNT_ID: &str = "01a7362d577a6c3019a474fd6f485823";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ===== Mock server =====

/// Client pointed at a mock server, retries disabled.
pub fn mock_client(base: &str) -> ZonesClient {
    mock_client_with_retries(base, 0)
}

pub fn mock_client_with_retries(base: &str, max_retries: u32) -> ZonesClient {
    let config = ZonesConfig::new(TEST_TOKEN)
        .with_api_base(base)
        .with_timeouts(2, 5)
        .with_max_retries(max_retries);
    match create_zones_client(config) {
        Ok(client) => client,
        Err(e) => panic!("mock client config rejected: {e}"),
    }
}

/// A zone object as returned by `GET /zones`.
pub fn zone_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": "active",
        "paused": false,
        "type": "full",
        "development_mode": 0,
        "account": {"id": ACCOUNT_ID, "name": "Demo Account"},
        "name_servers": ["bob.ns.cloudflare.com", "lola.ns.cloudflare.com"],
        "original_name_servers": ["ns1.registrar.example", "ns2.registrar.example"],
        "created_on": "2014-01-01T05:20:00.12345Z",
        "modified_on": "2014-01-01T05:20:00.12345Z",
        "activated_on": "2014-01-02T00:01:00.12345Z"
    })
}

pub fn success(result: Value) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    })
}

pub fn zone_list(zones: Vec<Value>) -> Value {
    let count = zones.len();
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": zones,
        "result_info": {"page": 1, "per_page": 20, "count": count, "total_count": count}
    })
}

pub fn failure(code: i64, message: &str) -> Value {
    json!({
        "success": false,
        "errors": [{"code": code, "message": message}],
        "messages": [],
        "result": null
    })
}

// ===== Live API =====

/// Live client from `CLOUDFLARE_API_TOKEN`.
pub fn live_client() -> Option<ZonesClient> {
    let config = ZonesConfig::from_env().ok()?;
    create_zones_client(config).ok()
}

pub fn account_id() -> String {
    env::var("CLOUDFLARE_ACCOUNT_ID").unwrap_or_default()
}

pub fn test_domain() -> String {
    env::var("TEST_DOMAIN").unwrap_or_default()
}

/// 生成一个不存在的域名（用于探测测试）
pub fn generate_missing_domain() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("zones-test-{}.example", &uuid.to_string()[..8])
}
