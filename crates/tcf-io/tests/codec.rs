//! End-to-end parse and print checks over whole formats.

use proptest::prelude::*;
use tcf_io::IoCodec;
use tcf_model::{
    GridSegment, IoFormat, LineSegment, LinesSegment, RawLinesSegment, Scalar, Sequence, Size,
    Table, Variables,
};

const BOGUS_TAIL: &str = "123\n42\n7\n5 6\n7 8\nbogus";

struct Fixture {
    vars: Variables,
    a: Scalar<i32>,
    v: Sequence<i32>,
    m: Table<i32>,
}

fn fixture() -> Fixture {
    let mut vars = Variables::new();
    let a = vars.scalar("A").expect("A");
    let v = vars.sequence("V").expect("V");
    let m = vars.table("M").expect("M");
    Fixture { vars, a, v, m }
}

fn empty_format() -> IoFormat {
    IoFormat::builder().build().expect("empty format")
}

fn scalar_last(f: &Fixture) -> IoFormat {
    let mut builder = IoFormat::builder();
    builder.input(LineSegment::new().with(f.a));
    builder.build_for(&f.vars).expect("scalar format")
}

fn vector_last(f: &Fixture) -> IoFormat {
    let mut builder = IoFormat::builder();
    builder
        .input(LineSegment::new().with(f.a))
        .input(LinesSegment::new().with_sequence(f.v).with_size(2));
    builder.build_for(&f.vars).expect("vector format")
}

fn matrix_last(f: &Fixture) -> IoFormat {
    let mut builder = IoFormat::builder();
    builder
        .input(LineSegment::new().with(f.a))
        .input(LinesSegment::new().with_sequence(f.v).with_size(2))
        .input(GridSegment::new(f.m, 2, 2));
    builder.build_for(&f.vars).expect("matrix format")
}

fn parse_error(format: &IoFormat, vars: &Variables, text: &str) -> String {
    let mut data = vars.instantiate();
    IoCodec::new(format)
        .parse_input(&mut data, text)
        .expect_err("parse should fail")
        .to_string()
}

#[test]
fn parses_full_format() {
    let f = fixture();
    let format = matrix_last(&f);
    let mut data = f.vars.instantiate();
    IoCodec::new(&format)
        .parse_input(&mut data, "123\n42\n7\n5 6\n7 8\n")
        .expect("parse");
    assert_eq!(data[f.a], 123);
    assert_eq!(data[f.v], vec![42, 7]);
    assert_eq!(data[f.m], vec![vec![5, 6], vec![7, 8]]);
}

#[test]
fn trailing_content_on_empty_format() {
    let f = fixture();
    assert_eq!(parse_error(&empty_format(), &f.vars, BOGUS_TAIL), "Expected: <EOF>");
}

#[test]
fn trailing_content_after_scalar() {
    let f = fixture();
    assert_eq!(
        parse_error(&scalar_last(&f), &f.vars, BOGUS_TAIL),
        "Expected: <EOF> after 'A'"
    );
}

#[test]
fn trailing_content_after_vector() {
    let f = fixture();
    assert_eq!(
        parse_error(&vector_last(&f), &f.vars, BOGUS_TAIL),
        "Expected: <EOF> after 'V[1]'"
    );
}

#[test]
fn trailing_content_after_matrix() {
    let f = fixture();
    assert_eq!(
        parse_error(&matrix_last(&f), &f.vars, BOGUS_TAIL),
        "Expected: <EOF> after 'M[1][1]'"
    );
}

#[test]
fn prints_full_format() {
    let f = fixture();
    let format = matrix_last(&f);
    let mut data = f.vars.instantiate();
    data[f.a] = 123;
    data[f.v] = vec![42, 7];
    data[f.m] = vec![vec![5, 6], vec![7, 8]];
    assert_eq!(
        IoCodec::new(&format).print_input(&data).expect("print"),
        "123\n42\n7\n5 6\n7 8\n"
    );
}

#[test]
fn rejects_malformed_tokens_and_separators() {
    let f = fixture();
    let format = matrix_last(&f);
    assert_eq!(
        parse_error(&format, &f.vars, "12x\n"),
        "Cannot parse for A. Found: '12x'"
    );
    assert_eq!(
        parse_error(&format, &f.vars, "123 \n"),
        "Expected: <newline> after 'A'"
    );
    assert_eq!(
        parse_error(&format, &f.vars, "123\n 42\n"),
        "Cannot parse for V[0]. Found: <whitespace>"
    );
    assert_eq!(
        parse_error(&format, &f.vars, "123\n42\n"),
        "Unexpected EOF for V[1]"
    );
    assert_eq!(
        parse_error(&format, &f.vars, "123\n42\n7\n5 6\n7 8"),
        "Expected: <newline> after 'M[1][1]'"
    );
}

#[test]
fn long_tokens_are_truncated_in_messages() {
    let f = fixture();
    assert_eq!(
        parse_error(&scalar_last(&f), &f.vars, "1234567890abcdefghijklmnop\n"),
        "Cannot parse for A. Found: '1234567890abcdefghij'"
    );
}

#[test]
fn reading_a_case_twice_replaces_values() {
    let f = fixture();
    let format = vector_last(&f);
    let codec = IoCodec::new(&format);
    let mut data = f.vars.instantiate();
    codec.parse_input(&mut data, "1\n2\n3\n").expect("first");
    codec.parse_input(&mut data, "4\n5\n6\n").expect("second");
    assert_eq!(data[f.v], vec![5, 6]);
}

fn token() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}"
}

#[derive(Debug, Clone)]
struct MixedCase {
    n: usize,
    r: usize,
    k: usize,
    c: char,
    x: f64,
    p: Vec<f32>,
    q: Vec<u8>,
    w: Vec<String>,
    g: Vec<Vec<i16>>,
}

fn mixed_case() -> impl Strategy<Value = MixedCase> {
    (0usize..5, 0usize..4, 1usize..4).prop_flat_map(|(n, r, k)| {
        (
            prop::char::range('!', '~'),
            -1.0e6f64..1.0e6,
            prop::collection::vec(-1.0e3f32..1.0e3, n),
            prop::collection::vec(any::<u8>(), n),
            prop::collection::vec(token(), n),
            prop::collection::vec(prop::collection::vec(any::<i16>(), k), r),
        )
            .prop_map(move |(c, x, p, q, w, g)| MixedCase { n, r, k, c, x, p, q, w, g })
    })
}

proptest! {
    #[test]
    fn jagged_tables_survive_print_then_parse(
        keys in prop::collection::vec(any::<i64>(), 0..6),
        rows in prop::collection::vec(prop::collection::vec(token(), 0..5), 0..6),
    ) {
        let count = keys.len().min(rows.len());
        let keys = keys[..count].to_vec();
        let rows = rows[..count].to_vec();

        let mut vars = Variables::new();
        let k = vars.sequence::<i64>("K").expect("K");
        let m = vars.table::<String>("M").expect("M");
        let mut builder = IoFormat::builder();
        builder.input(LinesSegment::new().with_sequence(k).with_table(m));
        let format = builder.build_for(&vars).expect("format");
        let codec = IoCodec::new(&format);

        let mut data = vars.instantiate();
        data[k] = keys.clone();
        data[m] = rows.clone();
        let text = codec.print_input(&data).expect("print");

        let mut parsed = vars.instantiate();
        codec.parse_input(&mut parsed, &text).expect("parse");
        prop_assert_eq!(&parsed[k], &keys);
        prop_assert_eq!(&parsed[m], &rows);
    }

    #[test]
    fn raw_lines_survive_print_then_parse(
        lines in prop::collection::vec("[ -~]{0,20}", 0..8),
    ) {
        let mut vars = Variables::new();
        let s = vars.raw_sequence("S").expect("S");
        let mut builder = IoFormat::builder();
        builder.input(RawLinesSegment::new(s).with_size(lines.len()));
        let format = builder.build_for(&vars).expect("format");
        let codec = IoCodec::new(&format);

        let mut data = vars.instantiate();
        data[s] = lines.clone();
        let text = codec.print_input(&data).expect("print");

        let mut parsed = vars.instantiate();
        codec.parse_input(&mut parsed, &text).expect("parse");
        prop_assert_eq!(&parsed[s], &lines);
    }

    #[test]
    fn mixed_primitives_survive_print_then_parse(case in mixed_case()) {
        let mut vars = Variables::new();
        let n = vars.scalar::<usize>("N").expect("N");
        let r = vars.scalar::<usize>("R").expect("R");
        let k = vars.scalar::<usize>("K").expect("K");
        let c = vars.scalar::<char>("C").expect("C");
        let x = vars.scalar::<f64>("X").expect("X");
        let p = vars.sequence::<f32>("P").expect("P");
        let q = vars.sequence::<u8>("Q").expect("Q");
        let w = vars.sequence::<String>("W").expect("W");
        let g = vars.table::<i16>("G").expect("G");
        let mut builder = IoFormat::builder();
        builder
            .input(LineSegment::new().with(n).with(r).with(k).with(c).with(x))
            .input(
                LinesSegment::new()
                    .with_sequence(p)
                    .with_sequence(q)
                    .with_sequence(w)
                    .with_size(Size::rule(move |d| d[n])),
            )
            .input(GridSegment::new(
                g,
                Size::rule(move |d| d[r]),
                Size::rule(move |d| d[k]),
            ));
        let format = builder.build_for(&vars).expect("format");
        let codec = IoCodec::new(&format);

        let mut data = vars.instantiate();
        data[n] = case.n;
        data[r] = case.r;
        data[k] = case.k;
        data[c] = case.c;
        data[x] = case.x;
        data[p] = case.p.clone();
        data[q] = case.q.clone();
        data[w] = case.w.clone();
        data[g] = case.g.clone();
        let text = codec.print_input(&data).expect("print");

        let mut parsed = vars.instantiate();
        codec.parse_input(&mut parsed, &text).expect("parse");
        prop_assert_eq!(parsed[c], case.c);
        prop_assert_eq!(parsed[x], case.x);
        prop_assert_eq!(&parsed[p], &case.p);
        prop_assert_eq!(&parsed[q], &case.q);
        prop_assert_eq!(&parsed[w], &case.w);
        prop_assert_eq!(&parsed[g], &case.g);
    }
}
