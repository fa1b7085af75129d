#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_builder::{UriBuilder, UriRef};

fuzz_target!(|data: &str| {
    let Ok(r) = UriRef::parse(data) else {
        assert!(UriBuilder::parse(data).is_err());
        return;
    };

    // An untouched seed builds back to itself.
    let mut b = UriBuilder::from_uri(&r);
    let built = b.build().unwrap();
    assert_eq!(built, r);

    // Appending keeps the seeded path and query as they were encoded.
    if r.authority().is_some() && r.fragment().is_none() {
        b.path("x").query_param("y", "z");
        let Ok(u) = b.build() else {
            return;
        };
        assert!(u.path().as_str().starts_with(r.path().as_str().trim_end_matches('/')));
        assert!(u.path().as_str().ends_with("/x"));
        let q = u.query().unwrap().as_str();
        assert!(q.ends_with("y=z"));
    }
});
