use admin_gate::{
    identity::IdentityProvider,
    models::Account,
    policy::{AuthorizationPolicy, IdentityGate},
    session::SessionContext,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

// --- Scripted Identity Provider ---

// The gate's collaborator, reduced to a canned answer. The gate only ever consumes
// the administrator predicate, so scripting `authenticate` exercises the provided
// predicate derivation as well.
struct ScriptedIdentity {
    account_to_return: Option<Account>,
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn authenticate(&self, _session: &SessionContext) -> Option<Account> {
        self.account_to_return.clone()
    }
}

// --- Test Utilities ---

const TEST_ACCOUNT_ID: Uuid = Uuid::from_u128(7);

fn gate_over(account: Option<Account>) -> IdentityGate {
    IdentityGate::new(Arc::new(ScriptedIdentity {
        account_to_return: account,
    }))
}

fn member_account() -> Account {
    Account {
        id: TEST_ACCOUNT_ID,
        email: "member@example.com".to_string(),
        role: "member".to_string(),
        created_at: Default::default(),
    }
}

fn admin_account() -> Account {
    Account {
        id: TEST_ACCOUNT_ID,
        email: "admin@example.com".to_string(),
        role: "admin".to_string(),
        created_at: Default::default(),
    }
}

// --- Scenario Tests ---

#[tokio::test]
async fn test_no_credentials_is_not_an_administrator() {
    // Scenario: the identity provider resolves nothing for this session.
    let gate = gate_over(None);
    let session = SessionContext::anonymous();

    assert!(gate.require_administrator(&session).await.is_err());
    assert!(!gate.show_admin_affordance(&session).await);
}

#[tokio::test]
async fn test_authenticated_member_is_not_an_administrator() {
    // Scenario: a valid identity without the administrator role. Mere authentication
    // must not open the gate.
    let gate = gate_over(Some(member_account()));
    let session = SessionContext::anonymous();

    assert!(gate.require_administrator(&session).await.is_err());
    assert!(!gate.show_admin_affordance(&session).await);
}

#[tokio::test]
async fn test_authenticated_administrator_passes_both_hooks() {
    let gate = gate_over(Some(admin_account()));
    let session = SessionContext::anonymous();

    assert!(gate.require_administrator(&session).await.is_ok());
    assert!(gate.show_admin_affordance(&session).await);
}

// --- Invariant Tests ---

#[tokio::test]
async fn test_hard_gate_and_affordance_never_disagree() {
    // Both operations must derive from the identical underlying predicate, for every
    // kind of session the provider can report.
    let cases = [None, Some(member_account()), Some(admin_account())];

    for account in cases {
        let gate = gate_over(account.clone());
        let session = SessionContext::anonymous();

        let admitted = gate.require_administrator(&session).await.is_ok();
        let displayed = gate.show_admin_affordance(&session).await;

        assert_eq!(
            admitted, displayed,
            "gate and affordance disagreed for account {:?}",
            account
        );
    }
}

#[tokio::test]
async fn test_repeated_calls_are_idempotent_for_one_session() {
    let gate = gate_over(Some(admin_account()));
    let session = SessionContext::anonymous();

    let first = gate.require_administrator(&session).await.is_ok();
    let second = gate.require_administrator(&session).await.is_ok();
    assert_eq!(first, second);

    let first = gate.show_admin_affordance(&session).await;
    let second = gate.show_admin_affordance(&session).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_denial_carries_no_payload() {
    // The negative outcome is a bare marker; everything user-visible about a denial
    // belongs to the engine's unauthorized path, not to the gate.
    let gate = gate_over(None);
    let session = SessionContext::anonymous();

    let denial = gate.require_administrator(&session).await.unwrap_err();
    assert_eq!(denial, admin_gate::policy::AccessDenied);
}
