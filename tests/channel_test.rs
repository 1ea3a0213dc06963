// tests/channel_test.rs

use issue1_client::{Channel, Issue1Client, QueryOptions, Result};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": data}))
}

fn ok_empty() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"status": "success"}))
}

#[tokio::test]
async fn test_add_and_get_channel() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/channels"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({
            "channelUsername": "daily",
            "name": "The Daily",
            "ownerUsername": "Cobotbol"
        })))
        .respond_with(ok(json!({
            "channelUsername": "daily",
            "name": "The Daily",
            "ownerUsername": "Cobotbol",
            "adminUsernames": ["Cobotbol"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily"))
        .respond_with(ok(json!({
            "channelUsername": "daily",
            "stickiedPostIDs": [3],
            "officialReleaseIDs": [8, 13]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Issue1Client::new(&server.uri())?;
    let channel = Channel {
        channel_username: "daily".to_string(),
        name: Some("The Daily".to_string()),
        owner_username: Some("Cobotbol".to_string()),
        ..Default::default()
    };
    let created = client.channels().add_channel(&channel, "tok").await?;
    assert_eq!(created.admin_usernames, vec!["Cobotbol".to_string()]);

    let fetched = client.channels().get_channel("daily", "").await?;
    assert_eq!(fetched.stickied_post_ids, vec![3]);
    assert_eq!(fetched.official_release_ids, vec![8, 13]);
    Ok(())
}

#[tokio::test]
async fn test_list_channels_without_pattern() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("sort", "name"))
        .respond_with(ok(json!([{"channelUsername": "a"}, {"channelUsername": "b"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = Issue1Client::new(&server.uri())?;
    let channels = client
        .channels()
        .get_channels(QueryOptions::new().sort_by("name", None))
        .await?;
    assert_eq!(channels.len(), 2);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests[0].url.query().is_some_and(|q| !q.contains("pattern")));
    Ok(())
}

#[tokio::test]
async fn test_admin_and_owner_management() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/channels/daily/admins/jeffrey"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/channels/daily/admins/jeffrey"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/channels/daily/owners/jeffrey"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/admins"))
        .respond_with(ok(json!(["Cobotbol", "jeffrey"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/owners"))
        .respond_with(ok(json!("jeffrey")))
        .expect(1)
        .mount(&server)
        .await;

    let channels = Issue1Client::new(&server.uri())?.channels();
    channels.add_admin_to_channel("daily", "jeffrey", "tok").await?;
    channels.remove_admin_from_channel("daily", "jeffrey", "tok").await?;
    channels.change_channel_owner("daily", "jeffrey", "tok").await?;

    assert_eq!(
        channels.get_admins("daily", "tok").await?,
        vec!["Cobotbol".to_string(), "jeffrey".to_string()]
    );
    assert_eq!(channels.get_owner("daily", "tok").await?, "jeffrey");
    Ok(())
}

#[tokio::test]
async fn test_catalogs() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/channels/daily/official/8"))
        .and(body_json(json!({"postID": 3})))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/channels/daily/official/8"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/channels/daily/catalogs/8"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/catalog"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ok(json!([{"id": 8, "type": "text"}, {"id": 9, "type": "image"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/official"))
        .respond_with(ok(json!([{"id": 8, "type": "text"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/catalogs/9"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ok(json!({"id": 9, "type": "image"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/official/8"))
        .respond_with(ok(json!({"id": 8, "type": "text"})))
        .expect(1)
        .mount(&server)
        .await;

    let channels = Issue1Client::new(&server.uri())?.channels();
    channels
        .add_release_to_official_catalog("daily", 8, 3, "tok")
        .await?;
    channels
        .remove_release_from_official_catalog("daily", 8, "tok")
        .await?;
    channels.remove_release_from_catalog("daily", 8, "tok").await?;

    let catalog = channels
        .get_catalog("daily", "tok", QueryOptions::new())
        .await?;
    assert_eq!(catalog.len(), 2);
    let official = channels
        .get_official_catalog("daily", QueryOptions::new())
        .await?;
    assert_eq!(official[0].id, 8);

    let unofficial = channels.get_release_from_catalog("daily", 9, "tok").await?;
    assert_eq!(unofficial.id, 9);
    let release = channels.get_release_from_official_catalog("daily", 8).await?;
    assert_eq!(release.id, 8);
    Ok(())
}

#[tokio::test]
async fn test_posts_and_stickies() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/Posts"))
        .respond_with(ok(json!([{"id": 3, "title": "Hello"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/Posts/3"))
        .respond_with(ok(json!({"id": 3, "title": "Hello", "originChannel": "daily"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/channels/daily/stickiedPosts/3"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/channels/daily/stickiedPosts/3"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/daily/stickiedPosts"))
        .respond_with(ok(json!([{"id": 3}])))
        .expect(1)
        .mount(&server)
        .await;

    let channels = Issue1Client::new(&server.uri())?.channels();
    let posts = channels.get_channel_posts("daily", QueryOptions::new()).await?;
    assert_eq!(posts[0].title.as_deref(), Some("Hello"));

    let post = channels.get_channel_post("daily", 3).await?;
    assert_eq!(post.origin_channel.as_deref(), Some("daily"));

    channels.sticky_post("daily", 3, "tok").await?;
    channels.remove_stickied_post("daily", 3, "tok").await?;
    assert_eq!(channels.get_stickied_posts("daily").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_channel() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/channels/daily"))
        .and(body_json(json!({"channelUsername": "daily", "description": "news"})))
        .respond_with(ok(json!({"channelUsername": "daily", "description": "news"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/channels/daily"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;

    let channels = Issue1Client::new(&server.uri())?.channels();
    let update = Channel {
        channel_username: "daily".to_string(),
        description: Some("news".to_string()),
        ..Default::default()
    };
    let updated = channels.update_channel("daily", &update, "tok").await?;
    assert_eq!(updated.description.as_deref(), Some("news"));
    channels.delete_channel("daily", "tok").await?;
    Ok(())
}
