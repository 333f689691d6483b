use criterion::{Criterion, black_box, criterion_group, criterion_main};

use case_core::vertex::{
    ElementType, VertexFormatCatalog, VertexFormatDescriptor, VertexFormatId, builtin_descriptor,
    semantics,
};

// ---------------------------------------------------------------------------
// Descriptor construction
// ---------------------------------------------------------------------------

fn bench_builtin_descriptor(c: &mut Criterion) {
    c.bench_function("builtin_descriptor_complete", |b| {
        b.iter(|| black_box(builtin_descriptor(black_box(&VertexFormatId::Complete))));
    });
}

fn bench_descriptor_builder(c: &mut Criterion) {
    c.bench_function("descriptor_builder_two_slots", |b| {
        b.iter(|| {
            black_box(
                VertexFormatDescriptor::builder(VertexFormatId::custom("skinned"))
                    .attribute_in_slot(semantics::TEXCOORD, ElementType::Float2, 0)
                    .attribute_in_slot(semantics::POSITION, ElementType::Float3, 1)
                    .attribute_in_slot(semantics::NORMAL, ElementType::Float3, 1)
                    .attribute_in_slot(semantics::TANGENT, ElementType::Float3, 1)
                    .build(),
            )
        });
    });
}

// ---------------------------------------------------------------------------
// Catalog lookup
// ---------------------------------------------------------------------------

fn bench_catalog_lookup(c: &mut Criterion) {
    let catalog = VertexFormatCatalog::builtin();
    c.bench_function("catalog_get_builtin", |b| {
        b.iter(|| black_box(catalog.get(black_box(&VertexFormatId::TexturedNormal))));
    });
}

fn bench_descriptor_attribute(c: &mut Criterion) {
    let descriptor = builtin_descriptor(&VertexFormatId::Complete).unwrap();
    c.bench_function("descriptor_attribute_by_semantic", |b| {
        b.iter(|| black_box(descriptor.attribute(black_box(semantics::BITANGENT))));
    });
}

criterion_group!(
    benches,
    bench_builtin_descriptor,
    bench_descriptor_builder,
    bench_catalog_lookup,
    bench_descriptor_attribute,
);
criterion_main!(benches);
