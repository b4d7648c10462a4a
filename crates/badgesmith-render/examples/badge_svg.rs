use badgesmith_render::model::BadgeRequest;
use badgesmith_render::svg::render_badge_svg;
use badgesmith_render::{LayoutOptions, layout_badge};

fn main() {
    let mut args = std::env::args().skip(1);
    let label = args.next().unwrap_or_else(|| "build".to_string());
    let value = args.next().unwrap_or_else(|| "passing".to_string());
    let theme = args.next().unwrap_or_else(|| "default".to_string());

    let request = BadgeRequest::new(label, value, theme, "");
    let layout_options = LayoutOptions::default();
    let layout = layout_badge(&request, &layout_options);
    eprintln!(
        "width={} label_x={} value_x={}",
        layout.width, layout.label.x, layout.value.x
    );

    print!("{}", render_badge_svg(&request, &layout_options));
}
