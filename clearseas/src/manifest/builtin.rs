use crate::manifest::descriptor::{AssetDescriptor, PlaybackRange};

struct BuiltinAsset {
    id: &'static str,
    src: &'static str,
    palettes: &'static [&'static str],
    accent: &'static str,
    blend: &'static str,
    depth: &'static str,
    rotate: &'static str,
    tilt_bias: f64,
    playback: Option<(f64, f64)>,
}

const IMAGES: &[BuiltinAsset] = &[
    BuiltinAsset {
        id: "glacial-orbit-panorama",
        src: "assets/Screenshot_20250430-141821.png",
        palettes: &["foundation", "meta"],
        accent: "#8ad7ff",
        blend: "screen",
        depth: "18px",
        rotate: "3deg",
        tilt_bias: 0.12,
        playback: None,
    },
    BuiltinAsset {
        id: "luminous-strata",
        src: "assets/Screenshot_20241012-073718.png",
        palettes: &["foundation", "immersive"],
        accent: "#ffd7ff",
        blend: "soft-light",
        depth: "22px",
        rotate: "-4deg",
        tilt_bias: -0.06,
        playback: None,
    },
    BuiltinAsset {
        id: "violet-surge",
        src: "assets/Screenshot_20250430-142024~2.png",
        palettes: &["concept", "immersive"],
        accent: "#e7b5ff",
        blend: "color-dodge",
        depth: "28px",
        rotate: "7deg",
        tilt_bias: 0.18,
        playback: None,
    },
    BuiltinAsset {
        id: "cyan-ribbon",
        src: "assets/Screenshot_20250430-142002~2.png",
        palettes: &["foundation", "concept"],
        accent: "#a2f4ff",
        blend: "screen",
        depth: "16px",
        rotate: "-6deg",
        tilt_bias: -0.08,
        playback: None,
    },
    BuiltinAsset {
        id: "ember-halo",
        src: "assets/Screenshot_20250430-142032~2.png",
        palettes: &["meta", "immersive"],
        accent: "#ffc89a",
        blend: "plus-lighter",
        depth: "24px",
        rotate: "5deg",
        tilt_bias: 0.22,
        playback: None,
    },
    BuiltinAsset {
        id: "signal-grid-a",
        src: "assets/file_00000000fc08623085668cf8b5e0a1e5.png",
        palettes: &["foundation", "immersive"],
        accent: "#8df0ff",
        blend: "overlay",
        depth: "20px",
        rotate: "-3deg",
        tilt_bias: 0.04,
        playback: None,
    },
    BuiltinAsset {
        id: "signal-grid-b",
        src: "assets/file_0000000054a06230817873012865d150.png",
        palettes: &["concept", "meta"],
        accent: "#ffbff5",
        blend: "color-dodge",
        depth: "26px",
        rotate: "9deg",
        tilt_bias: 0.16,
        playback: None,
    },
    BuiltinAsset {
        id: "signal-grid-c",
        src: "assets/file_0000000006fc6230a8336bfa1fcebd89.png",
        palettes: &["foundation"],
        accent: "#9fe2ff",
        blend: "screen",
        depth: "18px",
        rotate: "-2deg",
        tilt_bias: -0.04,
        playback: None,
    },
    BuiltinAsset {
        id: "aurora-shards",
        src: "assets/image_8 (1).png",
        palettes: &["concept", "meta"],
        accent: "#ffd7ff",
        blend: "soft-light",
        depth: "30px",
        rotate: "11deg",
        tilt_bias: 0.28,
        playback: None,
    },
];

const VIDEOS: &[BuiltinAsset] = &[
    BuiltinAsset {
        id: "neon-blossom",
        src: "20250505_1321_Neon Blossom Transformation_simple_compose_01jtgqf5vjevn8nbrnsx8yd5fs.mp4",
        palettes: &["concept", "meta"],
        accent: "#ffc9ff",
        blend: "screen",
        depth: "34px",
        rotate: "12deg",
        tilt_bias: 0.24,
        playback: Some((0.9, 1.25)),
    },
    BuiltinAsset {
        id: "noir-filament",
        src: "20250505_1726_Noir Filament Mystery_simple_compose_01jth5f1kwe9r9zxqet54bz3q0.mp4",
        palettes: &["immersive", "meta"],
        accent: "#a8dcff",
        blend: "color-dodge",
        depth: "32px",
        rotate: "-8deg",
        tilt_bias: -0.18,
        playback: Some((0.8, 1.2)),
    },
    BuiltinAsset {
        id: "gemstone-coral-a",
        src: "20250506_0014_Gemstone Coral Transformation_remix_01jthwv071e06vmjd0mn60zm3s.mp4",
        palettes: &["foundation", "immersive"],
        accent: "#ffe4b2",
        blend: "soft-light",
        depth: "30px",
        rotate: "6deg",
        tilt_bias: 0.1,
        playback: Some((0.85, 1.15)),
    },
    BuiltinAsset {
        id: "gemstone-coral-b",
        src: "20250506_0014_Gemstone Coral Transformation_remix_01jthwv0c4fxk8m0e79ry2t4ke.mp4",
        palettes: &["foundation", "concept"],
        accent: "#ffd3c8",
        blend: "screen",
        depth: "30px",
        rotate: "-5deg",
        tilt_bias: -0.06,
        playback: Some((0.9, 1.22)),
    },
    BuiltinAsset {
        id: "hydrolux-wave",
        src: "1746496560073.mp4",
        palettes: &["foundation", "immersive"],
        accent: "#8be3ff",
        blend: "overlay",
        depth: "28px",
        rotate: "4deg",
        tilt_bias: 0.08,
        playback: Some((0.95, 1.3)),
    },
    BuiltinAsset {
        id: "prismatic-tide",
        src: "1746500614769.mp4",
        palettes: &["concept", "meta"],
        accent: "#ffb8f8",
        blend: "plus-lighter",
        depth: "36px",
        rotate: "-10deg",
        tilt_bias: 0.2,
        playback: Some((0.88, 1.28)),
    },
    BuiltinAsset {
        id: "harmonic-rift",
        src: "1746576068221.mp4",
        palettes: &["immersive", "meta"],
        accent: "#9dd8ff",
        blend: "color-dodge",
        depth: "32px",
        rotate: "9deg",
        tilt_bias: -0.12,
        playback: Some((0.92, 1.18)),
    },
];

fn build(table: &[BuiltinAsset]) -> Vec<AssetDescriptor> {
    table
        .iter()
        .filter_map(|a| {
            let mut d = AssetDescriptor::new(a.src)?
                .with_id(a.id)
                .with_palettes(a.palettes.iter().copied())
                .with_accent(a.accent)
                .with_blend(a.blend)
                .with_depth(a.depth)
                .with_rotate(a.rotate)
                .with_tilt_bias(a.tilt_bias);
            if let Some(range) = a.playback.and_then(|(min, max)| PlaybackRange::new(min, max)) {
                d = d.with_playback(range);
            }
            Some(d)
        })
        .collect()
}

/// Decorative images shipped with the site.
pub fn builtin_images() -> Vec<AssetDescriptor> {
    build(IMAGES)
}

/// Ambient videos shipped with the site.
pub fn builtin_videos() -> Vec<AssetDescriptor> {
    build(VIDEOS)
}

pub(crate) fn builtin_image_sources() -> impl Iterator<Item = &'static str> {
    IMAGES.iter().map(|a| a.src)
}

pub(crate) fn builtin_video_sources() -> impl Iterator<Item = &'static str> {
    VIDEOS.iter().map(|a| a.src)
}
