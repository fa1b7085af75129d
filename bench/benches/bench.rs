use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uri_builder::UriBuilder;
use url::Url;

criterion_group!(
    benches,
    bench_parse,
    bench_build,
    bench_build_url,
    bench_build_encoded,
    bench_rebuild_seed,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_seed", |b| {
        b.iter(|| UriBuilder::parse(black_box(PARSE_CASE)))
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| {
            UriBuilder::new()
                .scheme("foo")
                .userinfo("user")
                .host("example.com")
                .port(8042)
                .path("/over")
                .path("there")
                .query_param("name", "ferret")
                .fragment("nose")
                .build()
        })
    });
}

fn bench_build_url(c: &mut Criterion) {
    c.bench_function("build_url", |b| {
        b.iter(|| {
            let mut url = Url::parse("foo://example.com")?;
            url.set_username("user").ok();
            url.set_port(Some(8042)).ok();
            if let Ok(mut segs) = url.path_segments_mut() {
                segs.push("over").push("there");
            }
            url.query_pairs_mut().append_pair("name", "ferret");
            url.set_fragment(Some("nose"));
            Ok::<_, url::ParseError>(url)
        })
    });
}

fn bench_build_encoded(c: &mut Criterion) {
    c.bench_function("build_encoded", |b| {
        b.iter(|| {
            UriBuilder::new()
                .scheme("https")
                .host("example.com")
                .path("/search results")
                .query_param("q", black_box("测试 a&b=c"))
                .query_param("page", [1, 2, 3])
                .build()
        })
    });
}

fn bench_rebuild_seed(c: &mut Criterion) {
    let seed = UriBuilder::parse(PARSE_CASE).unwrap();
    c.bench_function("rebuild_seed", |b| {
        b.iter(|| {
            black_box(&seed)
                .clone()
                .query_param("page", 2)
                .build()
        })
    });
}
