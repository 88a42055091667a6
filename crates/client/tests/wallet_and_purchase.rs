mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use fundportal_client::views::{AdminOverview, CustomerDashboard};
use fundportal_client::{BalanceUpdate, FormError, NavUpdate, PurchaseOrder};
use fundportal_core::{parse_amount, AccountId, SchemeId};

use common::{account_json, scheme_json, summary_json, user_json, Harness};

#[tokio::test]
async fn purchase_below_minimum_never_reaches_the_server() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("POST"))
        .and(path("/api/mutual-funds/purchase/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&h.server)
        .await;

    let balance = parse_amount("1000").unwrap();
    let err = PurchaseOrder::new(SchemeId::new(1), "50", &balance).unwrap_err();

    assert_eq!(err, FormError::BelowMinimum);
    assert_eq!(err.to_string(), "Minimum investment amount is ₹100");
}

#[tokio::test]
async fn purchase_over_balance_is_rejected_locally() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("GET"))
        .and(path("/api/bank-accounts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([account_json(4, 3, "100.00")])))
        .mount(&h.server)
        .await;

    let account = h.gateway.bank().get_mine().await.unwrap().unwrap();
    let err = PurchaseOrder::new(SchemeId::new(1), "150", &account.balance).unwrap_err();

    assert_eq!(err.to_string(), "Insufficient balance. You have ₹100.00");
}

#[tokio::test]
async fn valid_purchase_posts_scheme_and_amount() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("POST"))
        .and(path("/api/mutual-funds/purchase/"))
        .and(body_json(json!({ "scheme_id": 2, "amount": "250" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Purchase successful",
            "units_allotted": "19.8502",
            "remaining_balance": "50.00"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let order = PurchaseOrder::new(SchemeId::new(2), "250", &parse_amount("300").unwrap()).unwrap();
    let receipt = h.gateway.funds().purchase(&order).await.unwrap();

    assert_eq!(receipt.units_allotted, parse_amount("19.8502").unwrap());
    assert_eq!(receipt.remaining_balance, parse_amount("50").unwrap());
    assert!(receipt.transaction.is_none());
}

#[tokio::test]
async fn deposit_then_refetch_shows_new_balance() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("POST"))
        .and(path("/api/bank-accounts/4/update_balance/"))
        .and(body_json(json!({ "amount": "200", "operation": "ADD" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_json(4, 3, "500.00")))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bank-accounts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([account_json(4, 3, "500.00")])))
        .mount(&h.server)
        .await;

    let deposit = BalanceUpdate::deposit("200").unwrap();
    let updated = h.gateway.bank().update_balance(AccountId::new(4), &deposit).await.unwrap();
    assert_eq!(updated.balance, parse_amount("500").unwrap());

    let account = h.gateway.bank().get_mine().await.unwrap().unwrap();
    assert_eq!(account.balance, parse_amount("500").unwrap());
}

#[tokio::test]
async fn admin_nav_update_returns_scheme() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("POST"))
        .and(path("/api/mutual-funds/5/update_nav/"))
        .and(body_json(json!({ "nav": "45.25" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(scheme_json(5, "Growth", "45.25", true)))
        .mount(&h.server)
        .await;

    let nav = NavUpdate::new("45.25").unwrap();
    let scheme = h.gateway.funds().update_nav(SchemeId::new(5), &nav).await.unwrap();

    assert_eq!(scheme.nav, parse_amount("45.25").unwrap());
}

#[tokio::test]
async fn customer_without_account_has_zero_balance() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("GET"))
        .and(path("/api/bank-accounts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/portfolio/summary/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json("0.00", "0.00")))
        .mount(&h.server)
        .await;

    let dashboard = CustomerDashboard::load(&h.gateway).await.unwrap();

    assert!(!dashboard.has_account());
    assert_eq!(dashboard.balance(), parse_amount("0").unwrap());
    assert_eq!(dashboard.summary.holdings(), 0);
}

#[tokio::test]
async fn admin_overview_counts_schemes_and_users() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("GET"))
        .and(path("/api/mutual-funds/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            scheme_json(1, "Growth", "10.00", true),
            scheme_json(2, "Income", "12.00", false),
            scheme_json(3, "Index", "101.50", true)
        ])))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(1, "root", "ADMIN"),
            user_json(3, "alice", "CUSTOMER"),
            user_json(4, "bob", "CUSTOMER")
        ])))
        .mount(&h.server)
        .await;

    let overview = AdminOverview::load(&h.gateway).await.unwrap();

    // admins are not counted
    assert_eq!(
        overview,
        AdminOverview {
            total_schemes: 3,
            active_schemes: 2,
            total_users: 2,
        }
    );
}

#[tokio::test]
async fn admin_overview_counts_everyone_without_customers() {
    let h = Harness::with_tokens("a1", "r1").await;
    Mock::given(method("GET"))
        .and(path("/api/mutual-funds/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(1, "root", "ADMIN"),
            user_json(2, "ops", "ADMIN")
        ])))
        .mount(&h.server)
        .await;

    let overview = AdminOverview::load(&h.gateway).await.unwrap();

    assert_eq!(overview.total_users, 2);
    assert_eq!(overview.total_schemes, 0);
}
