use renderer::color::{Rgba, to_rgba, to_rgba_or_black};
use renderer::{DisplayList, PaintCommand};
use text::{FontCache, FontSlant, FontWeight};

fn rect(y1: f32, y2: f32) -> PaintCommand {
    PaintCommand::DrawRect {
        x1: 0.0,
        y1,
        x2: 10.0,
        y2,
        color: "gray".into(),
    }
}

#[test]
fn culls_commands_outside_the_window() {
    let _ = env_logger::builder().is_test(true).try_init();
    let fonts = FontCache::default();
    let font = fonts.get_font(16.0, FontWeight::Normal, FontSlant::Roman);
    let list = DisplayList::from_items([
        rect(0.0, 50.0),
        rect(120.0, 180.0),
        PaintCommand::DrawText {
            x: 5.0,
            y: 290.0,
            text: "edge".into(),
            font,
            color: "black".into(),
        },
        rect(400.0, 450.0),
    ]);

    let tops: Vec<f32> = list.visible(100.0, 200.0).map(PaintCommand::top).collect();
    assert_eq!(tops, vec![120.0, 290.0]);

    let screen = list.to_screen(100.0, 200.0);
    assert_eq!(screen[0], rect(20.0, 80.0));
}

#[test]
fn generation_bumps_on_replace() {
    let mut list = DisplayList::new();
    assert!(list.is_empty());
    assert_eq!(list.replace(vec![rect(0.0, 1.0)]), 1);
    assert_eq!(list.replace(vec![rect(0.0, 1.0), rect(2.0, 3.0)]), 2);
    assert_eq!(list.len(), 2);

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["generation"], 2);
    assert_eq!(json["items"][1]["DrawRect"]["y1"], 2.0);
}

#[test]
fn colors_resolve() {
    assert_eq!(
        to_rgba("lightblue"),
        Some(Rgba {
            red: 173,
            green: 216,
            blue: 230,
            alpha: 255
        })
    );
    assert_eq!(to_rgba("#ff000080").map(|color| color.alpha), Some(128));
    assert_eq!(to_rgba("transparent").map(|color| color.alpha), Some(0));
    assert_eq!(to_rgba_or_black("nonsense"), Rgba::BLACK);
}
