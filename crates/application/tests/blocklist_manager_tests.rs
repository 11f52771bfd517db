use memefeed_application::services::BlocklistManager;
use memefeed_domain::{BlocklistAction, BlocklistField, BlocklistSnapshot, DomainError};
use std::sync::Arc;

mod helpers;
use helpers::MockBlocklistRepository;

// ============================================================================
// Tests: mutations
// ============================================================================

#[tokio::test]
async fn test_add_persists_then_publishes() {
    // Arrange
    let repo = MockBlocklistRepository::new();
    let manager = BlocklistManager::new(Arc::new(repo.clone()));

    // Act
    let changed = manager.add_keyword("Crypto").await.unwrap();

    // Assert
    assert!(changed);
    assert!(manager.snapshot().keywords.contains("crypto"));
    assert!(repo.stored().await.keywords.contains("crypto"));
    assert_eq!(repo.save_calls(), 1);
}

#[tokio::test]
async fn test_adding_present_member_is_noop() {
    let repo = MockBlocklistRepository::new();
    let manager = BlocklistManager::new(Arc::new(repo.clone()));

    manager.add_user("troll").await.unwrap();
    let second = manager.add_user("TROLL").await.unwrap();

    assert!(!second);
    assert_eq!(manager.snapshot().users.len(), 1);
    assert_eq!(repo.save_calls(), 1);
}

#[tokio::test]
async fn test_removing_absent_member_is_noop() {
    let repo = MockBlocklistRepository::new();
    let manager = BlocklistManager::new(Arc::new(repo.clone()));

    let changed = manager.remove_url("nothing.example").await.unwrap();

    assert!(!changed);
    assert_eq!(repo.save_calls(), 0);
}

#[tokio::test]
async fn test_remove_after_add() {
    let repo = MockBlocklistRepository::new();
    let manager = BlocklistManager::new(Arc::new(repo.clone()));

    manager.add_url("scam.example").await.unwrap();
    let removed = manager.remove_url("SCAM.example").await.unwrap();

    assert!(removed);
    assert!(manager.snapshot().urls.is_empty());
    assert!(repo.stored().await.urls.is_empty());
}

#[tokio::test]
async fn test_failed_save_leaves_snapshot_unchanged() {
    // Arrange
    let repo = MockBlocklistRepository::new();
    repo.set_should_fail(true).await;
    let manager = BlocklistManager::new(Arc::new(repo.clone()));

    // Act
    let result = manager
        .apply(BlocklistAction::Add, BlocklistField::Keyword, "spam")
        .await;

    // Assert
    assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    assert!(manager.snapshot().is_empty());
}

// ============================================================================
// Tests: snapshots and reload
// ============================================================================

#[tokio::test]
async fn test_old_snapshot_is_unaffected_by_later_mutation() {
    let manager = BlocklistManager::new(Arc::new(MockBlocklistRepository::new()));

    let before = manager.snapshot();
    manager.add_keyword("spam").await.unwrap();

    assert!(before.keywords.is_empty());
    assert!(manager.snapshot().keywords.contains("spam"));
}

#[tokio::test]
async fn test_reload_reads_persisted_sets() {
    let mut persisted = BlocklistSnapshot::default();
    persisted.apply(BlocklistAction::Add, BlocklistField::User, "banned");
    let repo = MockBlocklistRepository::with_snapshot(persisted);
    let manager = BlocklistManager::new(Arc::new(repo));

    assert!(manager.snapshot().is_empty());
    manager.reload().await.unwrap();

    assert!(manager.snapshot().users.contains("banned"));
}

#[tokio::test]
async fn test_flush_writes_current_sets() {
    let repo = MockBlocklistRepository::new();
    let mut initial = BlocklistSnapshot::default();
    initial.apply(BlocklistAction::Add, BlocklistField::Keyword, "nft");
    let manager = BlocklistManager::with_snapshot(Arc::new(repo.clone()), initial);

    manager.flush().await.unwrap();

    assert!(repo.stored().await.keywords.contains("nft"));
}

#[tokio::test]
async fn test_concurrent_adds_all_land() {
    let repo = MockBlocklistRepository::new();
    let manager = Arc::new(BlocklistManager::new(Arc::new(repo.clone())));

    let handles: Vec<_> = (0..16)
        .map(|n| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.add_keyword(&format!("word{}", n)).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    assert_eq!(manager.snapshot().keywords.len(), 16);
    assert_eq!(repo.stored().await.keywords.len(), 16);
}
