// hostee-client/tests/profile_integration.rs
// 集成测试 - 个人资料读取与编辑

use hostee_client::{
    AuthService, ClientError, HosteeClient, LoginForm, MemoryBackend, ProfileField, ProfilePatch,
    RegistrationForm, UserProfile,
};
use serde_json::{Value, json};
use shared::models::Fields;

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

async fn signed_in(backend: &MemoryBackend) -> (HosteeClient, String) {
    let client = HosteeClient::in_memory(backend);
    let session = client
        .accounts()
        .register(&RegistrationForm::new(
            "ana@hostee.com",
            "secreto",
            "secreto",
            "Ana Pérez",
        ))
        .await
        .unwrap();
    (client, session.uid)
}

#[tokio::test]
async fn test_partial_edit_leaves_phone_intact() {
    let backend = MemoryBackend::new();
    let (client, uid) = signed_in(&backend).await;

    let mut doc = backend.document("users", &uid).unwrap();
    doc.insert("telefono".into(), json!("+52 614 999 0000"));
    backend.put_document("users", &uid, doc);

    client
        .profiles()
        .apply(&ProfilePatch::new().name("Ana").role("Mesera"))
        .await
        .unwrap();

    let doc = backend.document("users", &uid).unwrap();
    assert_eq!(doc["nombre"], json!("Ana"));
    assert_eq!(doc["puesto"], json!("Mesera"));
    assert_eq!(doc["telefono"], json!("+52 614 999 0000"));
    assert_eq!(doc["email"], json!("ana@hostee.com"));
    assert!(doc.contains_key("createdAt"));
    assert!(doc.contains_key("stats"));
}

#[tokio::test]
async fn test_missing_document_yields_full_default_profile() {
    let backend = MemoryBackend::new();
    let client = HosteeClient::in_memory(&backend);
    // Account without profile document
    backend.create_account("luis.m@hostee.com", "secreto").await.unwrap();
    client
        .accounts()
        .sign_in(&LoginForm::new("luis.m@hostee.com", "secreto"))
        .await
        .unwrap();

    let profile = client.profiles().load().await.unwrap();
    assert_eq!(profile, UserProfile::placeholder("luis.m@hostee.com"));
    assert_eq!(profile.name, "luis.m");
    assert_eq!(profile.role, "Empleado");
    assert_eq!(profile.shift, "No definido");
    assert_eq!(profile.experience, "Nuevo");
    assert_eq!(profile.restaurant, "Hostee Restaurant");
    assert_eq!(profile.phone, "+52 614 123 4567");
    assert!(profile.avatar.starts_with("https://"));
    assert_eq!(profile.stats.satisfaction, 95);
}

#[tokio::test]
async fn test_sparse_document_filled_with_display_defaults() {
    let backend = MemoryBackend::new();
    let (client, uid) = signed_in(&backend).await;
    backend.put_document("users", &uid, fields(json!({ "nombre": "Ana", "turno": "" })));

    let profile = client.profiles().load().await.unwrap();
    assert_eq!(profile.name, "Ana");
    assert_eq!(profile.email, "ana@hostee.com");
    assert_eq!(profile.role, "Empleado");
    assert_eq!(profile.shift, "No definido");
}

#[tokio::test]
async fn test_read_failure_falls_back_with_notice() {
    let backend = MemoryBackend::new();
    let (client, _) = signed_in(&backend).await;
    backend.set_store_offline(true);

    let loaded = client.profiles().load_or_default().await;
    assert!(loaded.is_fallback());
    assert_eq!(loaded.value.name, "ana");
    assert_eq!(
        loaded.notice.map(|n| n.message).as_deref(),
        Some("No se pudieron cargar los datos del perfil")
    );
}

#[tokio::test]
async fn test_draft_and_save_round() {
    let backend = MemoryBackend::new();
    let (client, uid) = signed_in(&backend).await;

    let mut draft = client.profiles().draft().await.unwrap();
    assert_eq!(draft.name, "Ana Pérez");
    assert_eq!(draft.role, "Mesero");

    draft.set(ProfileField::Shift, "Vespertino");
    client.profiles().save(&draft).await.unwrap();

    let doc = backend.document("users", &uid).unwrap();
    assert_eq!(doc["turno"], json!("Vespertino"));
    assert_eq!(doc["nombre"], json!("Ana Pérez"));
    assert!(doc.contains_key("stats"));
}

#[tokio::test]
async fn test_draft_of_empty_document_is_blank_form() {
    let backend = MemoryBackend::new();
    let (client, uid) = signed_in(&backend).await;
    backend.put_document("users", &uid, Fields::new());

    let draft = client.profiles().draft().await.unwrap();
    assert!(draft.name.is_empty());
    assert!(draft.avatar.starts_with("https://"));
}

#[tokio::test]
async fn test_save_failure_reports_error() {
    let backend = MemoryBackend::new();
    let (client, _) = signed_in(&backend).await;
    backend.set_store_offline(true);

    let err = client
        .profiles()
        .apply(&ProfilePatch::new().phone("+52 614 000 0000"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Store(_)));
}

#[tokio::test]
async fn test_profile_requires_session() {
    let backend = MemoryBackend::new();
    let client = HosteeClient::in_memory(&backend);

    assert!(matches!(
        client.profiles().load().await,
        Err(ClientError::NotAuthenticated)
    ));
    assert!(matches!(
        client.profiles().apply(&ProfilePatch::new().name("Ana")).await,
        Err(ClientError::NotAuthenticated)
    ));
    assert_eq!(backend.remote_calls(), 0);
}
