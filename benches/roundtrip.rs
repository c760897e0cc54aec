use criterion::{criterion_group, criterion_main, Criterion};

use coldstore::{ClassDef, Coldstore, Object, ObjectGraph, ObjectId, Value};

static ITEM: ClassDef = ClassDef::leaf("Item");
static INVENTORY: ClassDef = ClassDef::new("Inventory", || vec![&ITEM]);

/// Builds an inventory where every item appears twice: once expanded,
/// once as a shared reference.
fn build_inventory(count: usize) -> (ObjectGraph, ObjectId) {
    let mut graph = ObjectGraph::new();
    let inventory = graph.add(Object::instance("Inventory"));
    let mut slots = Vec::with_capacity(count);
    for serial in 0..count {
        let item = graph.add(Object::instance("Item"));
        graph.get_mut(item).set("serial", serial as i64);
        slots.push(Value::Object(item));
    }
    let mirror = slots.clone();
    graph.get_mut(inventory).set("slots", slots);
    graph.get_mut(inventory).set("mirror", mirror);
    (graph, inventory)
}

fn bench_encode(c: &mut Criterion) {
    let (graph, root) = build_inventory(1_000);
    c.bench_function("encode_1k_shared", |b| {
        b.iter(|| Coldstore::encode(&graph, root).expect("encode"))
    });
}

fn bench_decode(c: &mut Criterion) {
    let (graph, root) = build_inventory(1_000);
    let document = Coldstore::encode(&graph, root).expect("encode");
    c.bench_function("decode_1k_shared", |b| {
        b.iter(|| Coldstore::decode(&document, &INVENTORY).expect("decode"))
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
