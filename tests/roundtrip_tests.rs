#![allow(missing_docs)]

use coldstore::{ClassDef, Coldstore, Encoding, Object, ObjectGraph, ObjectId, Value};

// --- CLASSES ---

static ACTOR: ClassDef = ClassDef::leaf("Actor");
static GUILD: ClassDef = ClassDef::new("Guild", || vec![&ACTOR]);
static WORLD: ClassDef = ClassDef::new("World", || vec![&ACTOR, &GUILD]);

fn add_actor(graph: &mut ObjectGraph, name: &str, level: i64) -> ObjectId {
    let actor = graph.add(Object::instance("Actor"));
    graph.get_mut(actor).set("name", name);
    graph.get_mut(actor).set("level", level);
    actor
}

// --- TESTS ---

#[test]
fn scalars_round_trip() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("title", "Midgard");
    graph.get_mut(world).set("age", 9000_i64);
    graph.get_mut(world).set("sealed", false);
    graph.get_mut(world).set("drift", 0.25_f64);
    graph.get_mut(world).set("ruler", Value::Null);

    let document = Coldstore::encode(&graph, world)?;
    let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");

    let w = restored.graph().get(restored.root());
    assert_eq!(w.class(), Some("World"));
    assert_eq!(w.get("title"), Some(&Value::Text("Midgard".into())));
    assert_eq!(w.get("age"), Some(&Value::Int(9000)));
    assert_eq!(w.get("sealed"), Some(&Value::Bool(false)));
    assert_eq!(w.get("drift"), Some(&Value::Float(0.25)));
    assert_eq!(w.get("ruler"), Some(&Value::Null));
    Ok(())
}

/// Two fields pointing at the same sub-object must decode to one node,
/// not two equal copies.
#[test]
fn shared_subobject_decodes_to_one_node() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let ragnar = add_actor(&mut graph, "Ragnar", 12);
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("hero", ragnar);
    graph.get_mut(world).set("champion", ragnar);

    let document = Coldstore::encode(&graph, world)?;
    let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");

    let w = restored.graph().get(restored.root());
    let hero = w.get("hero").and_then(Value::as_object).expect("hero is an object");
    let champion = w
        .get("champion")
        .and_then(Value::as_object)
        .expect("champion is an object");
    assert_eq!(hero, champion);
    assert_eq!(
        restored.graph().get(hero).get("name"),
        Some(&Value::Text("Ragnar".into()))
    );
    Ok(())
}

/// The second encounter of an identity must collapse to a marker node
/// whose sole content is the target instance id.
#[test]
fn repeat_encounter_emits_a_bare_marker() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let ragnar = add_actor(&mut graph, "Ragnar", 12);
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("hero", ragnar);
    graph.get_mut(world).set("champion", ragnar);

    let document = Coldstore::encode(&graph, world)?;
    let node = document.as_object().expect("document is an object");
    assert_eq!(node["$$INSTANCE_ID"], 0);
    assert_eq!(node["hero"]["$$INSTANCE_ID"], 1);
    assert_eq!(node["hero"]["$$CLASS_NAME"], "Actor");

    let marker = node["champion"].as_object().expect("marker is an object");
    assert_eq!(marker.len(), 1);
    assert_eq!(marker["$$INSTANCE_REF"], 1);
    Ok(())
}

#[test]
fn direct_self_cycle_round_trips() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("itself", world);

    let document = Coldstore::encode(&graph, world)?;
    let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");

    let root = restored.root();
    assert_eq!(restored.graph().get(root).get("itself"), Some(&Value::Object(root)));
    Ok(())
}

#[test]
fn indirect_cycle_round_trips() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let world = graph.add(Object::instance("World"));
    let guild = graph.add(Object::instance("Guild"));
    graph.get_mut(world).set("guild", guild);
    graph.get_mut(guild).set("home", world);

    let document = Coldstore::encode(&graph, world)?;
    let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");

    let root = restored.root();
    let guild = restored
        .graph()
        .get(root)
        .get("guild")
        .and_then(Value::as_object)
        .expect("guild is an object");
    assert_eq!(restored.graph().get(guild).class(), Some("Guild"));
    assert_eq!(
        restored.graph().get(guild).get("home"),
        Some(&Value::Object(root))
    );
    Ok(())
}

/// Private-prefixed fields exist on the live object but never reach the
/// document and are never restored.
#[test]
fn private_prefix_fields_do_not_round_trip() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("visible", 1_i64);
    graph.get_mut(world).set("_scratch", "hidden");

    let document = Coldstore::encode(&graph, world)?;
    let text = serde_json::to_string(&document)?;
    assert!(!text.contains("_scratch"));
    assert!(!text.contains("hidden"));

    let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");
    let w = restored.graph().get(restored.root());
    assert_eq!(w.get("visible"), Some(&Value::Int(1)));
    assert!(w.get("_scratch").is_none());
    Ok(())
}

#[test]
fn instance_ids_follow_preorder_encounter_order() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let world = graph.add(Object::instance("World"));
    let first = add_actor(&mut graph, "Freya", 8);
    let second = add_actor(&mut graph, "Loki", 9);
    let mut nest = Object::plain();
    nest.set("inner", second);
    let nest = graph.add(nest);
    graph.get_mut(world).set("first", first);
    graph.get_mut(world).set("nest", nest);

    let document = Coldstore::encode(&graph, world)?;
    let node = document.as_object().expect("document is an object");
    assert_eq!(node["$$INSTANCE_ID"], 0);
    assert_eq!(node["first"]["$$INSTANCE_ID"], 1);
    assert_eq!(node["nest"]["$$INSTANCE_ID"], 2);
    assert_eq!(node["nest"]["inner"]["$$INSTANCE_ID"], 3);
    // Plain structural nodes carry an id but no class tag.
    assert!(node["nest"].get("$$CLASS_NAME").is_none());
    Ok(())
}

/// Markers can sit directly inside sequences, at any nesting depth, and
/// must still be patched back to the shared node.
#[test]
fn shared_references_inside_lists_round_trip() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let ragnar = add_actor(&mut graph, "Ragnar", 12);
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("hero", ragnar);
    graph.get_mut(world).set(
        "roster",
        vec![
            Value::Object(ragnar),
            Value::Text("vacant".into()),
            Value::Object(ragnar),
        ],
    );
    graph
        .get_mut(world)
        .set("squads", vec![Value::List(vec![Value::Object(ragnar)])]);

    let document = Coldstore::encode(&graph, world)?;
    let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");

    let w = restored.graph().get(restored.root());
    let hero = w.get("hero").and_then(Value::as_object).expect("hero is an object");
    let roster = w.get("roster").and_then(Value::as_list).expect("roster is a list");
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0], Value::Object(hero));
    assert_eq!(roster[1], Value::Text("vacant".into()));
    assert_eq!(roster[2], Value::Object(hero));

    let squads = w.get("squads").and_then(Value::as_list).expect("squads is a list");
    assert_eq!(squads[0], Value::List(vec![Value::Object(hero)]));
    Ok(())
}

#[test]
fn plain_nested_structures_round_trip_untyped() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let mut settings = Object::plain();
    settings.set("volume", 7_i64);
    settings.set("muted", true);
    let settings = graph.add(settings);
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("settings", settings);

    let document = Coldstore::encode(&graph, world)?;
    let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");

    let w = restored.graph().get(restored.root());
    let settings = w
        .get("settings")
        .and_then(Value::as_object)
        .expect("settings is an object");
    let s = restored.graph().get(settings);
    assert_eq!(s.class(), None);
    assert_eq!(s.get("volume"), Some(&Value::Int(7)));
    assert_eq!(s.get("muted"), Some(&Value::Bool(true)));
    Ok(())
}

#[test]
fn non_finite_floats_encode_as_null() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("bad", f64::NAN);

    let document = Coldstore::encode(&graph, world)?;
    assert!(document["bad"].is_null());
    Ok(())
}

#[test]
fn serialize_deserialize_round_trips_through_bytes() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let ragnar = add_actor(&mut graph, "Ragnar", 12);
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("hero", ragnar);

    let bytes = Coldstore::serialize(&graph, world, Encoding::Json)?;
    let restored =
        Coldstore::deserialize(&bytes, &WORLD, Encoding::Json)?.expect("root tag matches");

    let w = restored.graph().get(restored.root());
    let hero = w.get("hero").and_then(Value::as_object).expect("hero is an object");
    assert_eq!(
        restored.graph().get(hero).get("level"),
        Some(&Value::Int(12))
    );
    Ok(())
}

#[test]
fn json_text_is_pretty_printed() -> coldstore::Result<()> {
    let mut graph = ObjectGraph::new();
    let world = graph.add(Object::instance("World"));
    graph.get_mut(world).set("title", "Midgard");

    let text = Coldstore::to_json(&graph, world)?;
    assert!(text.contains("\n  \"title\""));

    let restored = Coldstore::from_json(&text, &WORLD)?.expect("root tag matches");
    assert_eq!(
        restored.graph().get(restored.root()).get("title"),
        Some(&Value::Text("Midgard".into()))
    );
    Ok(())
}
