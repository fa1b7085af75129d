#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use uri_builder::UriBuilder;

#[derive(Arbitrary, Debug)]
struct Components<'a> {
    userinfo: Option<&'a str>,
    reg_name: Option<RegName>,
    port: Option<u16>,
    segments: Vec<&'a str>,
    params: Vec<(&'a str, Vec<&'a str>)>,
    fragment: Option<&'a str>,
}

#[derive(Arbitrary, Debug)]
struct RegName(Vec<u8>);

impl RegName {
    fn to_host(&self) -> String {
        self.0
            .iter()
            .map(|x| char::from(b'a' + x % 26))
            .collect()
    }
}

fuzz_target!(|c: Components<'_>| {
    let has_authority = c.userinfo.is_some() || c.reg_name.is_some() || c.port.is_some();
    let first_segment = c.segments.iter().find(|s| !s.is_empty());
    if !has_authority && first_segment.map_or(false, |s| s.starts_with("//")) {
        return;
    }

    let mut b = UriBuilder::new();
    b.scheme("http")
        .userinfo(c.userinfo)
        .host(c.reg_name.as_ref().map(RegName::to_host).as_deref())
        .port(c.port.map_or(-1, i32::from))
        .fragment(c.fragment);
    for seg in &c.segments {
        b.path(*seg);
    }
    for (name, values) in &c.params {
        b.query_param(name, values);
    }

    // With a valid scheme and host, every other component is encoded into a valid URI.
    let u = b.build().unwrap();
    assert_eq!(b.build().unwrap(), u);

    let a = u.authority();
    assert_eq!(a.is_some(), has_authority);
    if let Some(a) = a {
        assert_eq!(
            a.userinfo().map(|s| s.decode().into_string().unwrap().into_owned()),
            c.userinfo.map(String::from)
        );
        assert_eq!(a.port_to_u16().unwrap(), c.port);
    }

    assert_eq!(
        u.fragment().map(|s| s.decode().into_string().unwrap().into_owned()),
        c.fragment.map(String::from)
    );

    let pairs: Vec<(&str, &str)> = b.query_params().pairs().collect();
    match u.query() {
        Some(q) => {
            let parsed: Vec<(String, String)> = q
                .split('&')
                .map(|pair| {
                    let (k, v) = pair.split_once('=').unwrap();
                    (
                        k.decode().into_string().unwrap().into_owned(),
                        v.decode().into_string().unwrap().into_owned(),
                    )
                })
                .collect();
            assert!(parsed
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .eq(pairs.iter().copied()));
        }
        None => assert!(pairs.is_empty()),
    }
});
