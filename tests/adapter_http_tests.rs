// HTTP adapter tests against mocked provider endpoints
use serde_json::json;
use token_risk_engine::adapters::{
    ChainStateReader, DexPairReader, DexScreenerPairReader, HolderListReader,
    HttpTokenMetadataReader, HttpTransactionHistoryReader, LunarCrushReader, RpcChainStateReader,
    RpcHolderListReader, SocialMetricsReader, TokenMetadataReader, TransactionHistoryReader,
    TransactionKind,
};
use token_risk_engine::config::Settings;
use token_risk_engine::error::ProviderErrorKind;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.chain.rpc_url = server.uri();
    settings.providers.token_api_base_url = server.uri();
    settings.providers.dexscreener_base_url = server.uri();
    settings.providers.lunarcrush_base_url = server.uri();
    settings.providers.lunarcrush_api_key = Some("test-key".to_string());
    settings.engine.provider_timeout_seconds = 5;
    settings
}

#[tokio::test]
async fn chain_state_reads_parsed_mint_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({ "method": "getAccountInfo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "context": { "slot": 123 },
                "value": {
                    "data": {
                        "parsed": {
                            "type": "mint",
                            "info": {
                                "decimals": 6,
                                "supply": "1000000000000",
                                "mintAuthority": "9vpsmXhZYMpvhCKiVoX5U8b1iKpfwJaFpPEEXF7hRm9h",
                                "freezeAuthority": null
                            }
                        },
                        "program": "spl-token"
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let reader = RpcChainStateReader::new(&settings_for(&server)).unwrap();
    let info = reader.get_mint_info(MINT).await.unwrap();

    assert_eq!(info.decimals, 6);
    assert_eq!(info.supply_raw, "1000000000000");
    assert!(info.mint_authority.is_some());
    assert!(info.freeze_authority.is_none());
}

#[tokio::test]
async fn chain_state_null_value_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "context": { "slot": 123 }, "value": null }
        })))
        .mount(&server)
        .await;

    let reader = RpcChainStateReader::new(&settings_for(&server)).unwrap();
    let err = reader.get_mint_info(MINT).await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::NotFound);
}

#[tokio::test]
async fn chain_state_rejects_non_mint_accounts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "value": {
                    "data": {
                        "parsed": {
                            "type": "account",
                            "info": { "decimals": 0, "supply": "0" }
                        }
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let reader = RpcChainStateReader::new(&settings_for(&server)).unwrap();
    let err = reader.get_mint_info(MINT).await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Malformed);
}

#[tokio::test]
async fn chain_state_surfaces_rpc_errors_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid param" }
        })))
        .mount(&server)
        .await;

    let reader = RpcChainStateReader::new(&settings_for(&server)).unwrap();
    let err = reader.get_mint_info(MINT).await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Unavailable);
    assert!(err.message.contains("-32602"));
}

#[tokio::test]
async fn holders_truncate_to_requested_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getTokenLargestAccounts" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "value": [
                    { "address": "holder1", "amount": "500", "decimals": 0, "uiAmountString": "500" },
                    { "address": "holder2", "amount": "300", "decimals": 0, "uiAmountString": "300" },
                    { "address": "holder3", "amount": "200", "decimals": 0, "uiAmountString": "200" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let reader = RpcHolderListReader::new(&settings_for(&server)).unwrap();
    let holders = reader.get_top_holders(MINT, 2).await.unwrap();

    assert_eq!(holders.len(), 2);
    assert_eq!(holders[0].owner, "holder1");
    assert_eq!(holders[0].amount_raw, "500");
    assert_eq!(holders[1].owner, "holder2");
}

#[tokio::test]
async fn dexscreener_maps_pairs_with_missing_liquidity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/latest/dex/tokens/{}", MINT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemaVersion": "1.0.0",
            "pairs": [
                {
                    "dexId": "raydium",
                    "pairAddress": "pair-a",
                    "liquidity": { "usd": 125000.5 },
                    "volume": { "h24": 40000.0 }
                },
                {
                    "dexId": "orca",
                    "pairAddress": "pair-b",
                    "liquidity": null,
                    "volume": null
                }
            ]
        })))
        .mount(&server)
        .await;

    let reader = DexScreenerPairReader::new(&settings_for(&server)).unwrap();
    let pairs = reader.get_pairs(MINT).await.unwrap();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].dex_id, "raydium");
    assert_eq!(pairs[0].liquidity_usd, 125000.5);
    assert_eq!(pairs[0].volume_24h_usd, Some(40000.0));
    assert_eq!(pairs[1].liquidity_usd, 0.0);
    assert_eq!(pairs[1].volume_24h_usd, None);
}

#[tokio::test]
async fn dexscreener_null_pairs_means_no_pools() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemaVersion": "1.0.0",
            "pairs": null
        })))
        .mount(&server)
        .await;

    let reader = DexScreenerPairReader::new(&settings_for(&server)).unwrap();
    let pairs = reader.get_pairs(MINT).await.unwrap();
    assert!(pairs.is_empty());
}

#[tokio::test]
async fn dexscreener_http_statuses_map_to_error_kinds() {
    let cases = [
        (404, ProviderErrorKind::NotFound),
        (429, ProviderErrorKind::RateLimited),
        (401, ProviderErrorKind::Unauthorized),
        (500, ProviderErrorKind::Unavailable),
    ];
    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let reader = DexScreenerPairReader::new(&settings_for(&server)).unwrap();
        let err = reader.get_pairs(MINT).await.unwrap_err();
        assert_eq!(err.kind, expected, "HTTP {}", status);
        assert_eq!(err.provider, "dexscreener");
    }
}

#[tokio::test]
async fn dexscreener_garbage_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>upstream proxy error</html>"))
        .mount(&server)
        .await;

    let reader = DexScreenerPairReader::new(&settings_for(&server)).unwrap();
    let err = reader.get_pairs(MINT).await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Malformed);
}

#[tokio::test]
async fn metadata_reader_sends_key_and_parses_creator() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/meta"))
        .and(query_param("tokenAddress", MINT))
        .and(header("token", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Example Token",
            "symbol": "EXT",
            "decimals": 6,
            "supply": "1000000000000",
            "holder": 4521,
            "creator": { "address": "creatorWallet", "sharePercent": 12.5 }
        })))
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.providers.token_api_key = Some("test-key".to_string());

    let reader = HttpTokenMetadataReader::new(&settings).unwrap();
    let meta = reader.get_meta(MINT).await.unwrap();

    assert_eq!(meta.symbol.as_deref(), Some("EXT"));
    assert_eq!(meta.decimals, Some(6));
    assert_eq!(meta.holder_count, Some(4521));
    assert_eq!(meta.creator_address.as_deref(), Some("creatorWallet"));
    assert_eq!(meta.creator_share_percent, Some(12.5));
}

#[tokio::test]
async fn metadata_reader_tolerates_sparse_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "EXT"
        })))
        .mount(&server)
        .await;

    let reader = HttpTokenMetadataReader::new(&settings_for(&server)).unwrap();
    let meta = reader.get_meta(MINT).await.unwrap();

    assert_eq!(meta.symbol.as_deref(), Some("EXT"));
    assert!(meta.decimals.is_none());
    assert!(meta.creator_share_percent.is_none());
}

#[tokio::test]
async fn transactions_parse_kinds_and_skip_bad_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/transfer"))
        .and(query_param("address", MINT))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "type": "transfer", "amount": "25000000000", "blockTime": 1756400000 },
                { "type": "burn", "amount": "1000", "blockTime": 1756400100 },
                { "type": "transfer", "amount": "500", "blockTime": i64::MAX }
            ]
        })))
        .mount(&server)
        .await;

    let reader = HttpTransactionHistoryReader::new(&settings_for(&server)).unwrap();
    let txs = reader.get_recent_transactions(MINT, 50).await.unwrap();

    // The out-of-range timestamp row is dropped, not an error.
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].kind, TransactionKind::Transfer);
    assert_eq!(txs[0].amount_raw, "25000000000");
    assert_eq!(txs[1].kind, TransactionKind::Burn);
}

#[tokio::test]
async fn social_reader_rescales_sentiment_and_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/coins/ext/v1"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "sentiment": 72.0,
                "galaxy_score": 61.5,
                "social_volume_24h": 150000
            }
        })))
        .mount(&server)
        .await;

    let reader = LunarCrushReader::new(&settings_for(&server)).unwrap();
    let summary = reader.get_social_summary("EXT").await.unwrap();

    assert!((summary.relative_sentiment - 0.72).abs() < 1e-9);
    assert_eq!(summary.social_volume, 150000);
    assert_eq!(summary.galaxy_score, Some(61.5));
}

#[tokio::test]
async fn social_posts_drop_rows_without_titles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/topic/ext/posts/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "post_title": "to the moon", "post_created": 1756400000 },
                { "post_title": null, "post_created": 1756400050 },
                { "post_title": "to the moon", "post_created": 1756400100 }
            ]
        })))
        .mount(&server)
        .await;

    let reader = LunarCrushReader::new(&settings_for(&server)).unwrap();
    let posts = reader.get_recent_posts("EXT").await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].text, "to the moon");
}

#[tokio::test]
async fn social_reader_requires_credentials() {
    let server = MockServer::start().await;
    let mut settings = settings_for(&server);
    settings.providers.lunarcrush_api_key = None;

    assert!(LunarCrushReader::new(&settings).is_err());
}
