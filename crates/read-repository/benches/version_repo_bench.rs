use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use read_repository::{
    BackoffConfig, InMemoryReadRepository, InstrumentedRepo, ModelId, QueryContext, ReadModel,
    ReadRepository, RepoError, Version, VersionRepo, locate_version_repo,
};

#[derive(Debug, Clone)]
struct Snapshot {
    version: Version,
}

impl ReadModel for Snapshot {
    fn version(&self) -> Option<Version> {
        Some(self.version)
    }
}

/// Populate a store with N models at version 3, returning their IDs.
async fn populate_store(store: &InMemoryReadRepository<Snapshot>, n: usize) -> Vec<ModelId> {
    let ctx = QueryContext::new();
    let mut ids = Vec::with_capacity(n);
    for _ in 0..n {
        let id = ModelId::new();
        store
            .save(
                &ctx,
                id,
                Snapshot {
                    version: Version::new(3),
                },
            )
            .await
            .unwrap();
        ids.push(id);
    }
    ids
}

fn bench_find_without_min_version(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryReadRepository::new();
    let ids = rt.block_on(populate_store(&store, 1000));
    let repo = VersionRepo::new(store);
    let ctx = QueryContext::new();

    c.bench_function("version_repo/find_pass_through", |b| {
        let mut next = ids.iter().cycle();
        b.iter(|| {
            let id = *next.next().unwrap();
            rt.block_on(repo.find(&ctx, id)).unwrap();
        });
    });
}

fn bench_find_satisfied_min_version(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryReadRepository::new();
    let ids = rt.block_on(populate_store(&store, 1000));
    let repo = VersionRepo::new(store);
    let ctx = QueryContext::new().with_min_version(Version::new(3));

    c.bench_function("version_repo/find_min_version_satisfied", |b| {
        let mut next = ids.iter().cycle();
        b.iter(|| {
            let id = *next.next().unwrap();
            rt.block_on(repo.find(&ctx, id)).unwrap();
        });
    });
}

fn bench_find_one_version_behind(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryReadRepository::new();
    let ids = rt.block_on(populate_store(&store, 100));
    let config = BackoffConfig {
        initial: Duration::from_millis(1),
        max: Duration::from_millis(2),
        factor: 2.0,
    };
    let repo = VersionRepo::with_backoff(store, config);

    let mut group = c.benchmark_group("version_repo");
    group.sample_size(10);
    group.bench_function("find_one_version_behind_until_deadline", |b| {
        let mut next = ids.iter().cycle();
        b.iter(|| {
            let id = *next.next().unwrap();
            let result = rt.block_on(async {
                let ctx = QueryContext::new()
                    .with_min_version(Version::new(4))
                    .with_timeout(Duration::from_millis(5));
                repo.find(&ctx, id).await
            });
            assert!(matches!(result, Err(RepoError::DeadlineExceeded)));
        });
    });
    group.finish();
}

fn bench_locate_in_deep_chain(c: &mut Criterion) {
    let mut repo: Box<dyn ReadRepository<Model = Snapshot>> =
        Box::new(VersionRepo::new(InMemoryReadRepository::<Snapshot>::new()));
    for _ in 0..16 {
        repo = Box::new(InstrumentedRepo::new("bench", repo));
    }

    c.bench_function("chain/locate_version_repo_depth_16", |b| {
        b.iter(|| {
            assert!(locate_version_repo(Some(repo.as_ref())).is_some());
        });
    });
}

criterion_group!(
    benches,
    bench_find_without_min_version,
    bench_find_satisfied_min_version,
    bench_find_one_version_behind,
    bench_locate_in_deep_chain,
);
criterion_main!(benches);
