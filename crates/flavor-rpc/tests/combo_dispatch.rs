//! End-to-end dispatch tests: a combo flavor served behind the type router,
//! with its members resolved through a router as well.

use async_trait::async_trait;
use flavor_combo::ComboFlavor;
use flavor_rpc::{
    DrainRequest, FlavorRouter, FlavorServer, HealthyRequest, PrepareRequest, ValidateRequest,
};
use flavor_spi::{
    AllocationMethod, Error, FlavorPlugin, Health, InstanceDescription, InstanceId, InstanceSpec,
    Result,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Leaf flavor with fixed behavior and a shared call journal.
struct LeafFlavor {
    name: String,
    health: Health,
    drain_error: Option<String>,
    tag: Option<(String, String)>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl FlavorPlugin for LeafFlavor {
    async fn validate(&self, _: &Value, _: &AllocationMethod) -> Result<()> {
        Ok(())
    }

    async fn prepare(
        &self,
        _: &Value,
        mut spec: InstanceSpec,
        _: &AllocationMethod,
    ) -> Result<InstanceSpec> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}.prepare", self.name));
        if let Some((key, value)) = &self.tag {
            spec.tags.insert(key.clone(), value.clone());
        }
        Ok(spec)
    }

    async fn healthy(&self, _: &Value, _: &InstanceDescription) -> Result<Health> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}.healthy", self.name));
        Ok(self.health)
    }

    async fn drain(&self, _: &Value, _: &InstanceDescription) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}.drain", self.name));
        match &self.drain_error {
            Some(message) => Err(Error::plugin(message.clone())),
            None => Ok(()),
        }
    }
}

fn leaf(name: &str, calls: Arc<Mutex<Vec<String>>>) -> LeafFlavor {
    LeafFlavor {
        name: name.to_string(),
        health: Health::Healthy,
        drain_error: None,
        tag: None,
        calls,
    }
}

/// Build a server exposing a combo of the given leaves under the "combo" tag.
fn server_with_leaves(
    leaves: Vec<(String, LeafFlavor)>,
) -> (FlavorServer, Value) {
    let member_tags: Vec<Value> = leaves
        .iter()
        .map(|(name, _)| json!({"plugin": name, "properties": {}}))
        .collect();

    let mut members: HashMap<String, Arc<dyn FlavorPlugin>> = HashMap::new();
    for (name, flavor) in leaves {
        members.insert(name, Arc::new(flavor));
    }
    let member_router = Arc::new(FlavorRouter::with_types(members));

    let mut typed: HashMap<String, Arc<dyn FlavorPlugin>> = HashMap::new();
    typed.insert(
        "combo".to_string(),
        Arc::new(ComboFlavor::new(member_router)),
    );
    let server = FlavorServer::new(Arc::new(FlavorRouter::with_types(typed)));

    (server, json!({"flavors": member_tags}))
}

fn instance() -> InstanceDescription {
    InstanceDescription {
        id: InstanceId::from("inst-42"),
        logical_id: None,
        tags: HashMap::new(),
    }
}

#[smol_potat::test]
async fn test_combo_validate_through_server() {
    let calls = Arc::new(Mutex::new(vec![]));
    let (server, properties) = server_with_leaves(vec![
        ("a".to_string(), leaf("a", calls.clone())),
        ("b".to_string(), leaf("b", calls.clone())),
    ]);

    let response = server
        .validate(ValidateRequest {
            plugin_type: "combo".to_string(),
            properties,
            allocation: AllocationMethod::default(),
        })
        .await
        .unwrap();

    assert_eq!(response.plugin_type, "combo");
    assert!(response.ok);
}

#[smol_potat::test]
async fn test_combo_healthy_short_circuits_through_server() {
    let calls = Arc::new(Mutex::new(vec![]));
    let mut unhealthy = leaf("b", calls.clone());
    unhealthy.health = Health::Unhealthy;

    let (server, properties) = server_with_leaves(vec![
        ("a".to_string(), leaf("a", calls.clone())),
        ("b".to_string(), unhealthy),
        ("c".to_string(), leaf("c", calls.clone())),
    ]);

    let response = server
        .healthy(HealthyRequest {
            plugin_type: "combo".to_string(),
            properties,
            instance: instance(),
        })
        .await
        .unwrap();

    assert_eq!(response.health, Health::Unhealthy);
    assert_eq!(*calls.lock().unwrap(), vec!["a.healthy", "b.healthy"]);
}

#[smol_potat::test]
async fn test_combo_drain_aggregates_through_server() {
    let calls = Arc::new(Mutex::new(vec![]));
    let mut failing_b = leaf("b", calls.clone());
    failing_b.drain_error = Some("x".to_string());
    let mut failing_c = leaf("c", calls.clone());
    failing_c.drain_error = Some("y".to_string());

    let (server, properties) = server_with_leaves(vec![
        ("a".to_string(), leaf("a", calls.clone())),
        ("b".to_string(), failing_b),
        ("c".to_string(), failing_c),
    ]);

    let err = server
        .drain(DrainRequest {
            plugin_type: "combo".to_string(),
            properties,
            instance: instance(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "x, y");
    assert_eq!(*calls.lock().unwrap(), vec!["a.drain", "b.drain", "c.drain"]);
}

#[smol_potat::test]
async fn test_combo_prepare_merges_through_server() {
    let calls = Arc::new(Mutex::new(vec![]));
    let mut a = leaf("a", calls.clone());
    a.tag = Some(("k".to_string(), "1".to_string()));
    let mut b = leaf("b", calls.clone());
    b.tag = Some(("k".to_string(), "2".to_string()));

    let (server, properties) = server_with_leaves(vec![
        ("a".to_string(), a),
        ("b".to_string(), b),
    ]);

    let response = server
        .prepare(PrepareRequest {
            plugin_type: "combo".to_string(),
            properties,
            spec: InstanceSpec::default(),
            allocation: AllocationMethod::default(),
        })
        .await
        .unwrap();

    // Later member wins the tag collision.
    assert_eq!(response.spec.tags["k"], "2");
}

#[smol_potat::test]
async fn test_unknown_outer_type_never_reaches_members() {
    let calls = Arc::new(Mutex::new(vec![]));
    let (server, properties) = server_with_leaves(vec![("a".to_string(), leaf("a", calls.clone()))]);

    let result = server
        .healthy(HealthyRequest {
            plugin_type: "nonexistent".to_string(),
            properties,
            instance: instance(),
        })
        .await;

    assert!(matches!(result, Err(Error::UnknownPluginType(_))));
    assert!(calls.lock().unwrap().is_empty());
}
