use std::collections::VecDeque;

use uri_builder::{QueryParams, QueryValues, UriBuilder};

fn strings(vs: &[&str]) -> Vec<String> {
    vs.iter().map(|&s| s.to_owned()).collect()
}

#[test]
fn append_and_replace() {
    let mut params = QueryParams::new();
    params.append("k", ["v1"]).append("k", ["v2"]);
    assert_eq!(params.get("k"), Some(&strings(&["v1", "v2"])[..]));

    params.replace_all("k", ["v3"]);
    assert_eq!(params.get("k"), Some(&strings(&["v3"])[..]));

    params.append("k", vec![String::from("v4"), String::from("v5")]);
    assert_eq!(params.get("k"), Some(&strings(&["v3", "v4", "v5"])[..]));
}

#[test]
fn empty_input_is_a_no_op() {
    let mut params = QueryParams::new();
    params
        .append("k", Vec::<String>::new())
        .replace_all("k", Vec::<&str>::new())
        .append("", ["v"])
        .replace_all("", ["v"]);
    assert!(params.is_empty());
    assert_eq!(params.get("k"), None);
    assert_eq!(params, QueryParams::default());
}

#[test]
fn key_order_is_insertion_order() {
    let mut params = QueryParams::new();
    params
        .append("z", ["1"])
        .append("a", ["2"])
        .append("m", ["3"])
        .append("z", ["4"])
        .replace_all("a", ["5"]);

    assert!(params.iter().map(|(k, _)| k).eq(["z", "a", "m"]));
    assert!(params
        .pairs()
        .eq([("z", "1"), ("z", "4"), ("a", "5"), ("m", "3")]));
    assert_eq!(params.iter().len(), 3);
    assert_eq!(params.iter().next_back().map(|(k, _)| k), Some("m"));

    let mut n = 0;
    for (_, vs) in &params {
        n += vs.len();
    }
    assert_eq!(n, 4);
}

#[test]
fn builder_exposes_params() {
    let mut b = UriBuilder::new();
    b.query_param("a", ["1", "2"]).query_param("b", 3);
    assert!(b.query_params().pairs().eq([("a", "1"), ("a", "2"), ("b", "3")]));

    let b = UriBuilder::parse("?x=%20&y&x=2").unwrap();
    assert!(b.query_params().pairs().eq([("x", " "), ("x", "2"), ("y", "")]));
}

#[test]
fn typed_values_flatten_one_level() {
    assert_eq!(1u8.into_strings(), ["1"]);
    assert_eq!(["a", "b"].into_strings(), ["a", "b"]);
    assert_eq!(
        (1, "two", [3, 4], vec![5.5]).into_strings(),
        ["1", "two", "3", "4", "5.5"]
    );
    assert_eq!(
        vec![VecDeque::from(['x', 'y']), VecDeque::from(['z'])].into_strings(),
        ["x", "y", "z"]
    );
    assert_eq!([&[1, 2][..], &[3][..]].into_strings(), ["1", "2", "3"]);
    assert!(None::<u32>.into_strings().is_empty());
    assert!(().into_strings().is_empty());
}

#[test]
fn typed_values_through_builder() {
    let ids = vec![10u64, 20, 30];
    let uri = UriBuilder::new()
        .query_param("id", &ids)
        .query_param("flag", true)
        .replace_query_param("id", &ids[..1])
        .build()
        .unwrap();
    assert_eq!(uri, "?id=10&flag=true");
    assert_eq!(ids.len(), 3);
}

#[cfg(feature = "serde")]
#[test]
fn serialize_as_map() {
    let b = UriBuilder::parse("?a=1&b=%20&a=2").unwrap();
    let json = serde_json::to_string(b.query_params()).unwrap();
    assert_eq!(json, r#"{"a":["1","2"],"b":[" "]}"#);

    assert_eq!(serde_json::to_string(&QueryParams::new()).unwrap(), "{}");
}
