//! # Access Pipeline Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | policy | one rule-set decision against the embedded rules |
//! | identity | envelope decode + PEM + X.509 subject read |
//! | invoke | full delegated-user read through the dispatcher |

use coc_access_control::{
    embedded_enforcer, Action, IdentityVerifier, ObjectRef, PolicyEngine, PolicyRequest,
    X509IdentityVerifier,
};
use coc_ledger::MockStub;
use coc_tests::fixtures::{creator, CustodyNetwork, GATEWAY_CN, HOT, INVESTIGATOR, LAB_ORG};
use coc_types::PolicyDomain;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_policy(c: &mut Criterion) {
    let engine = embedded_enforcer().expect("embedded policy loads");
    let mut group = c.benchmark_group("policy");

    let cases = [
        ("allow", INVESTIGATOR, PolicyDomain::Hot, ObjectRef::Evidence("E-1".into()), Action::View),
        ("deny", "BlockchainCourt", PolicyDomain::Hot, ObjectRef::Evidence("E-1".into()), Action::View),
        ("unknown_domain", INVESTIGATOR, PolicyDomain::Unknown, ObjectRef::Investigations, Action::View),
    ];
    for (name, role, domain, object, action) in cases {
        let request = PolicyRequest::new(role, domain, &object, action);
        group.bench_with_input(BenchmarkId::new("enforce", name), &request, |b, request| {
            b.iter(|| black_box(engine.enforce(request)))
        });
    }
    group.finish();
}

fn bench_identity(c: &mut Criterion) {
    let verifier = X509IdentityVerifier::default();
    let envelope = creator(LAB_ORG, GATEWAY_CN, &["client"]);
    c.bench_function("identity/extract", |b| {
        b.iter(|| black_box(verifier.extract(black_box(&envelope))))
    });
}

fn bench_invoke(c: &mut Criterion) {
    let net = CustodyNetwork::new();
    net.grant(HOT, "bench", INVESTIGATOR);
    net.seed_case(HOT, "bench", INVESTIGATOR, "I1", "E1");
    let gateway = creator(LAB_ORG, GATEWAY_CN, &["client"]);

    c.bench_function("invoke/get_evidence", |b| {
        b.iter(|| {
            let stub = MockStub::builder(net.ledger(HOT))
                .creator(gateway.clone())
                .channel(HOT)
                .transient("userId", "bench")
                .transient("role", INVESTIGATOR)
                .invoke("GetEvidence", ["E1"])
                .build();
            black_box(net.chaincode.invoke(&stub))
        })
    });
}

criterion_group!(benches, bench_policy, bench_identity, bench_invoke);
criterion_main!(benches);
