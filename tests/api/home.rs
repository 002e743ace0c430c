use crate::helper::spawn_app;

#[tokio::test]
async fn home_serves_the_contact_form() {
    let app = spawn_app().await;

    let response = app.get_home().await;

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/html"));

    let body = response.text().await.unwrap();
    for control in ["name=\"name\"", "name=\"email\"", "name=\"subject\"", "name=\"message\""] {
        assert!(body.contains(control), "form is missing {}", control);
    }
    assert!(body.contains("/api/contact"));
}
