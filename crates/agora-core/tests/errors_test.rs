use agora_core::errors::*;

#[test]
fn idea_not_found_carries_id() {
    let err = AgoraError::IdeaNotFound { id: 42 };
    assert!(err.to_string().contains("42"));
}

#[test]
fn invalid_link_carries_endpoints_and_reason() {
    let err = AgoraError::InvalidLink {
        source_id: 3,
        target_id: 9,
        reason: "different discussions".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("3 -> 9"));
    assert!(msg.contains("different discussions"));
}

#[test]
fn cascade_failed_carries_idea_and_reason() {
    let err = AgoraError::CascadeFailed {
        idea_id: 7,
        reason: "constraint".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains('7'));
    assert!(msg.contains("constraint"));
}

#[test]
fn storage_error_converts_into_agora_error() {
    let err: AgoraError = StorageError::SqliteError {
        message: "disk I/O".into(),
    }
    .into();
    assert!(matches!(err, AgoraError::StorageError(_)));
    assert!(err.to_string().contains("disk I/O"));
}

#[test]
fn graph_error_converts_into_agora_error() {
    let err: AgoraError = GraphError::unsupported("ancestors", "multiple targets").into();
    match err {
        AgoraError::GraphError(GraphError::UnsupportedOperation { operation, reason }) => {
            assert_eq!(operation, "ancestors");
            assert_eq!(reason, "multiple targets");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn serde_json_error_converts_into_agora_error() {
    let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
    let err: AgoraError = json_err.into();
    assert!(matches!(err, AgoraError::SerializationError(_)));
}

#[test]
fn migration_failed_carries_version() {
    let err = StorageError::MigrationFailed {
        version: 2,
        reason: "syntax".into(),
    };
    assert!(err.to_string().contains("v2"));
}
