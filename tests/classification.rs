//! Classification service behaviour against a scripted invoker and a mock server.

mod support;

use enreachvoice::{
    ClassificationService, ClassifiedType, Error, Method, NewClassification, PrettyTags,
    SchemaListOptions,
};
use serde_json::json;
use support::mock_server::MockServerFixture;
use support::scripted::ScriptedInvoker;

fn sample_schema() -> serde_json::Value {
    json!({
        "Id": "schema-1",
        "Name": "Call Classification",
        "Groups": [
            {
                "Id": 1,
                "Name": "Reason for call",
                "MinSelections": 1,
                "MaxSelections": 1,
                "Tags": [{"Id": 100, "Name": "Sales demo"}]
            },
            {
                "Id": 2,
                "Name": "Products",
                "MinSelections": 0,
                "MaxSelections": 5,
                "Tags": [
                    {"Id": 300, "Name": "Hammers"},
                    {"Id": 301, "Name": "Screwdrivers"},
                    {"Id": 302, "Name": "Drills", "StyleEnum": "Primary"}
                ]
            }
        ]
    })
}

fn sample_classification(tag_ids: &[i64]) -> serde_json::Value {
    json!({
        "Id": "cls-1",
        "TagSchemaId": "schema-1",
        "TagSelections": tag_ids.iter().map(|id| json!({"TagId": id})).collect::<Vec<_>>(),
        "CallId": "call-456",
        "ClassifiedType": "ServiceCall",
        "Modified": "2025-10-28T13:57:03.4Z"
    })
}

#[tokio::test]
async fn pretty_classification_groups_tags_by_schema() {
    let invoker = ScriptedInvoker::ok(vec![
        json!([sample_classification(&[100, 300, 301])]),
        sample_schema(),
    ]);
    let service = ClassificationService::new(invoker.clone());

    let decorated = service
        .get_call_classification_pretty("call-456")
        .await
        .unwrap()
        .expect("classification should exist");

    let pretty = decorated.tags_pretty.as_ref().unwrap();
    assert_eq!(
        pretty.get("Reason for call"),
        Some(&PrettyTags::Single("Sales demo".into()))
    );
    assert_eq!(
        pretty.get("Products"),
        Some(&PrettyTags::Multiple(vec!["Hammers".into(), "Screwdrivers".into()]))
    );
    assert_eq!(decorated.call_id.as_deref(), Some("call-456"));

    let requests = invoker.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/classification/instance/");
    assert_eq!(requests[0].query_value("CallId"), Some("call-456"));
    assert_eq!(requests[1].path, "/classification/schemas/schema-1");
    assert_eq!(requests[1].query_value("IncludeChildren"), Some("true"));
}

#[tokio::test]
async fn pretty_classification_is_none_when_call_is_unclassified() {
    let invoker = ScriptedInvoker::ok(vec![json!([])]);
    let service = ClassificationService::new(invoker.clone());

    let result = service.get_call_classification_pretty("call-456").await.unwrap();
    assert!(result.is_none());
    assert_eq!(invoker.requests().len(), 1);
}

#[tokio::test]
async fn pretty_classification_without_schema_is_returned_untouched() {
    let invoker = ScriptedInvoker::ok(vec![json!([{
        "Id": "cls-1",
        "TagSelections": [{"TagId": 100}],
        "CallId": "call-456"
    }])]);
    let service = ClassificationService::new(invoker.clone());

    let result = service
        .get_call_classification_pretty("call-456")
        .await
        .unwrap()
        .unwrap();
    assert!(result.tags_pretty.is_none());
    assert!(serde_json::to_value(&result).unwrap().get("TagsPretty").is_none());
    assert_eq!(invoker.paths(), vec!["/classification/instance/"]);
}

#[tokio::test]
async fn pretty_classification_with_empty_schema_is_returned_untouched() {
    for schema in [json!({}), json!(null)] {
        let invoker = ScriptedInvoker::ok(vec![json!([sample_classification(&[100, 300])]), schema]);
        let service = ClassificationService::new(invoker.clone());

        let result = service
            .get_call_classification_pretty("call-456")
            .await
            .unwrap()
            .unwrap();
        assert!(result.tags_pretty.is_none());
        assert_eq!(result.tag_selections.len(), 2);
        assert_eq!(
            invoker.paths(),
            vec!["/classification/instance/", "/classification/schemas/schema-1"]
        );
    }
}

#[tokio::test]
async fn schema_fetch_failure_propagates() {
    let invoker = ScriptedInvoker::new(vec![
        Ok(json!([sample_classification(&[100])])),
        Err(Error::NotFound {
            message: "Resource not found: /classification/schemas/schema-1".into(),
            status: 404,
            body: None,
        }),
    ]);
    let service = ClassificationService::new(invoker);

    let err = service
        .get_call_classification_pretty("call-456")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { status: 404, .. }));
}

#[tokio::test]
async fn empty_call_id_is_rejected_before_any_request() {
    let invoker = ScriptedInvoker::ok(vec![]);
    let service = ClassificationService::new(invoker.clone());

    let err = service.get_call_classification_pretty("").await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(err.to_string().contains("call_id is required"));

    let err = service.get_call_classification("").await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(invoker.requests().is_empty());
}

#[tokio::test]
async fn find_requires_some_identifier() {
    let invoker = ScriptedInvoker::ok(vec![]);
    let service = ClassificationService::new(invoker.clone());

    let err = service.find_classifications(None, None).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(err
        .to_string()
        .contains("Either call_id or callback_list_item_id must be provided"));
    assert!(invoker.requests().is_empty());
}

#[tokio::test]
async fn find_sends_both_identifiers() {
    let invoker = ScriptedInvoker::ok(vec![json!([])]);
    let service = ClassificationService::new(invoker.clone());

    service
        .find_classifications(Some("call-456"), Some("item-123"))
        .await
        .unwrap();
    let request = &invoker.requests()[0];
    assert_eq!(request.query_value("CallId"), Some("call-456"));
    assert_eq!(request.query_value("CallbackListItemId"), Some("item-123"));
}

#[tokio::test]
async fn create_targets_call_or_list_item_by_type() {
    let invoker = ScriptedInvoker::ok(vec![
        json!({"Id": "classification-123", "CallId": "call-456"}),
        json!({"Id": "classification-124", "CallListItemId": "item-789"}),
    ]);
    let service = ClassificationService::new(invoker.clone());

    let created = service
        .create_classification(
            &NewClassification::new("call-456", "schema-1", [19, 23]).note("Test note"),
        )
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("classification-123"));

    service
        .create_classification(
            &NewClassification::new("item-789", "schema-1", [17])
                .classified_type(ClassifiedType::CallListItem),
        )
        .await
        .unwrap();

    let requests = invoker.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "/classification/instance");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "TagSchemaId": "schema-1",
            "TagSelections": [{"TagId": 19}, {"TagId": 23}],
            "ClassifiedType": "ServiceCall",
            "Note": "Test note",
            "CallId": "call-456"
        }))
    );

    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(body["ClassifiedType"], "CallListItem");
    assert_eq!(body["CallListItemId"], "item-789");
    assert!(body.get("CallId").is_none());
    assert!(body.get("Note").is_none());
}

#[tokio::test]
async fn create_validates_inputs() {
    let invoker = ScriptedInvoker::ok(vec![]);
    let service = ClassificationService::new(invoker.clone());

    let cases = [
        (NewClassification::new("", "schema-1", [1]), "call_id is required"),
        (NewClassification::new("call-1", "", [1]), "schema_id is required"),
        (
            NewClassification::new("call-1", "schema-1", Vec::<i64>::new()),
            "tag_selections cannot be empty",
        ),
        (
            NewClassification::new("call-1", "schema-1", [1]).note("x".repeat(501)),
            "note cannot exceed 500 characters",
        ),
    ];
    for (new, expected) in cases {
        let err = service.create_classification(&new).await.unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{}' in '{}'",
            expected,
            err
        );
    }
    assert!(invoker.requests().is_empty());
}

#[tokio::test]
async fn schema_listing_sends_flags() {
    use chrono::TimeZone;

    let invoker = ScriptedInvoker::ok(vec![json!([sample_schema()])]);
    let service = ClassificationService::new(invoker.clone());
    let options = SchemaListOptions {
        include_children: true,
        modified_after: Some(chrono::Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        ..Default::default()
    };

    let schemas = service.get_classification_schemas(&options).await.unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].groups[1].tags[2].style.as_deref(), Some("Primary"));

    let request = &invoker.requests()[0];
    assert_eq!(request.path, "/classification/schemas");
    assert_eq!(request.query_value("IncludeChildren"), Some("true"));
    assert_eq!(request.query_value("IncludeArchived"), Some("false"));
    assert_eq!(request.query_value("IncludeDeleted"), Some("false"));
    assert_eq!(
        request.query_value("ModifiedAfter"),
        Some("2025-01-01T00:00:00.000000Z")
    );
}

#[tokio::test]
async fn schema_by_id_requires_id() {
    let service = ClassificationService::new(ScriptedInvoker::ok(vec![]));
    let err = service.get_classification_schema("", true).await.unwrap_err();
    assert!(err.to_string().contains("schema_id is required"));
}

#[tokio::test]
async fn pretty_classification_over_http() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.client().await;

    let find = fixture
        .server
        .mock("GET", "/classification/instance/")
        .match_query(mockito::Matcher::UrlEncoded(
            "CallId".into(),
            "call-456".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([sample_classification(&[100, 300, 301, 999])]).to_string())
        .create_async()
        .await;
    let schema = fixture
        .server
        .mock("GET", "/classification/schemas/schema-1")
        .match_query(mockito::Matcher::UrlEncoded(
            "IncludeChildren".into(),
            "true".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(sample_schema().to_string())
        .create_async()
        .await;

    let decorated = client
        .get_call_classification_pretty("call-456")
        .await
        .unwrap()
        .unwrap();
    find.assert_async().await;
    schema.assert_async().await;

    let value = serde_json::to_value(&decorated).unwrap();
    assert_eq!(
        value["TagsPretty"],
        json!({"Reason for call": "Sales demo", "Products": ["Hammers", "Screwdrivers"]})
    );
    assert_eq!(value["Modified"], "2025-10-28T13:57:03.4Z");
}

#[tokio::test]
async fn queue_and_calllist_bindings() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.client().await;
    fixture
        .mock_json(
            "GET",
            "/classification/queueschemas",
            200,
            r#"[{"QueueId":"queue-1","QueueName":"Sales Queue","SchemaId":"schema-1"}]"#,
        )
        .await;
    fixture
        .mock_json(
            "GET",
            "/classification/calllistschemas",
            200,
            r#"[{"ListId":"list-1","ListName":"Callbacks","SchemaId":"schema-2","RequestTypeId":4}]"#,
        )
        .await;

    let service = client.classifications();
    let queues = service.get_queue_schemas().await.unwrap();
    assert_eq!(queues[0].queue_name.as_deref(), Some("Sales Queue"));
    let lists = service.get_calllist_schemas().await.unwrap();
    assert_eq!(lists[0].request_type_id, Some(4));
}
