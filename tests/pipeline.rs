use gallium::interpreter::{IContext, Value};
use gallium::playback::{MidiSink, Playback};
use gallium::syntax::{Document, parse_top_level, pretty_top_level, print_top_level};
use gallium::top_level::{default_state, global_context, pulse};
use gallium::type_checker::check;
use gallium::types::Type;
use gallium::{Error, evaluate, interpret, parse_and_resolve};

const PROGRAM: &str = "# a small groove
stack
  do
    channel 9
    note 36 38
  do
    note 60 63 67
    fast 2
";

#[test]
fn program_runs_through_every_stage() {
    let document = parse_top_level(PROGRAM).unwrap();
    let abt = gallium::resolver::resolve(&global_context(), &document.tree).unwrap();
    check(&abt, &Type::Transformer).unwrap();

    let mut ctx = IContext::new(default_state());
    let transformer = gallium::interpreter::interpret(&abt, &mut ctx)
        .and_then(Value::into_transformer)
        .unwrap();
    let events = transformer.apply(pulse()).query(0.0, 1.0);

    let drums: Vec<_> = events.iter().filter(|e| e.value.channel == 9).collect();
    let keys: Vec<_> = events.iter().filter(|e| e.value.channel == 0).collect();
    assert_eq!(drums.len(), 1);
    assert_eq!(drums[0].value.pitch, Some(36));
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].value.pitch, Some(60));
    assert_eq!(keys[1].value.pitch, Some(63));
}

#[test]
fn staged_and_one_step_evaluation_agree() {
    let abt = parse_and_resolve(PROGRAM).unwrap();
    let staged = interpret(&abt).unwrap().query(0.0, 4.0);
    let direct = evaluate(PROGRAM).unwrap().query(0.0, 4.0);
    assert_eq!(staged, direct);
}

#[test]
fn formatting_keeps_the_meaning() {
    let code = "do\n   note 60\n   fast   2";
    let tree = parse_top_level(code).unwrap().tree;
    let formatted = print_top_level(&Document::new(pretty_top_level(&tree)));
    assert_eq!(formatted, "do\n  note 60\n  fast 2");
    assert_eq!(
        evaluate(&formatted).unwrap().query(0.0, 2.0),
        evaluate(code).unwrap().query(0.0, 2.0)
    );
}

#[test]
fn program_text_prints_back_unchanged() {
    let document = parse_top_level(PROGRAM).unwrap();
    assert_eq!(print_top_level(&document), PROGRAM);
}

#[test]
fn errors_are_displayable() {
    let cases = [
        ("note (", "parse error"),
        ("note 60\nloud 3", "Could not resolve variable loud"),
        ("channel 1 2", "type error"),
    ];
    for (code, message) in cases {
        let err: Error = evaluate(code).err().unwrap();
        assert!(
            err.to_string().starts_with(message),
            "{:?} gave {:?}",
            code,
            err.to_string()
        );
    }
}

#[derive(Default)]
struct Recorder(Vec<Vec<u8>>);

impl MidiSink for Recorder {
    fn send(&mut self, bytes: &[u8], _timestamp_ms: f64) {
        self.0.push(bytes.to_vec());
    }
}

#[test]
fn playback_sends_the_queried_notes() {
    let mut playback = Playback::new(evaluate("note 60 62").unwrap(), 120.0, 90);
    let mut sink = Recorder::default();
    playback.query_and_send(0.0, &mut sink);
    playback.query_and_send(500.0, &mut sink);
    assert_eq!(
        sink.0,
        vec![
            vec![0x90, 60, 90],
            vec![0x80, 60, 0],
            vec![0x90, 62, 90],
            vec![0x80, 62, 0],
        ]
    );
}
