use std::collections::HashSet;

use approx::assert_abs_diff_eq;
use dipvis::{
    lab_uniform, normalize_lightness, vis_hists, vis_hsv_cube, vis_lab_cube, vis_rgb_cube, vis_ybr_cube,
    HistogramConfig, Image, PerceptualModel, RasterSurface, RecordingSurface, RenderConfig, ScatterConfig,
    VisError,
};

fn noise_image(height: usize, width: usize, seed: u32) -> Image {
    // small LCG, enough to spread values over the byte range
    let mut state = seed;
    let data = (0..height * width * 3)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) % 256) as i32
        })
        .collect();
    Image::from_integer_vec(height, width, 3, data).unwrap()
}

fn lightness(rgb: [f32; 3]) -> f32 {
    PerceptualModel::CieLab.lightness(rgb)
}

#[test]
fn rgb_cube_samples_min_of_count_and_pixels() {
    for (height, width, count) in [(1, 1, 5000), (10, 10, 50), (10, 10, 100), (30, 40, 5000)] {
        let image = noise_image(height, width, 7);
        let mut surface = RecordingSurface::default();
        let config = ScatterConfig::default().with_sample_count(count).with_seed(11);

        let figure = vis_rgb_cube(&image, &config, &mut surface).unwrap();
        let unique: HashSet<usize> = figure.indices.iter().copied().collect();

        assert_eq!(figure.len(), count.min(height * width));
        assert_eq!(unique.len(), figure.len());
        assert!(figure.indices.iter().all(|i| *i < height * width));
        assert_eq!(surface.scatters.len(), 1);
    }
}

#[test]
fn two_by_two_covers_every_pixel() {
    let image = Image::from_integer_vec(2, 2, 3, vec![
        255, 0, 0,   0, 255, 0,
        0, 0, 255,   255, 255, 255,
    ]).unwrap();
    let mut surface = RecordingSurface::default();
    let config = ScatterConfig::default().with_sample_count(4).with_seed(3);

    let figure = vis_rgb_cube(&image, &config, &mut surface).unwrap();
    let raw = [[255.0, 0.0, 0.0], [0.0, 255.0, 0.0], [0.0, 0.0, 255.0], [255.0, 255.0, 255.0]];

    let covered: HashSet<usize> = figure.indices.iter().copied().collect();
    assert_eq!(covered, HashSet::from([0, 1, 2, 3]));
    for (idx, point) in figure.indices.iter().zip(&figure.points) {
        assert_eq!(*point, raw[*idx]);
    }
    for (idx, color) in figure.indices.iter().zip(&figure.colors) {
        assert_eq!(*color, raw[*idx].map(|v| v / 255.0));
    }
}

#[test]
fn wrong_channel_counts_rejected_everywhere() {
    for channels in [2, 4] {
        let image = Image::from_float_vec(2, 2, channels, vec![0.5; 4 * channels]).unwrap();
        let mut surface = RecordingSurface::default();
        let config = ScatterConfig::default();

        let err = vis_rgb_cube(&image, &config, &mut surface).unwrap_err();
        assert!(err.to_string().contains(&format!("{channels}]")), "{err}");
        assert!(matches!(vis_hsv_cube(&image, &config, &mut surface), Err(VisError::Validation { .. })));
        assert!(matches!(vis_lab_cube(&image, &config, &mut surface), Err(VisError::Validation { .. })));
        assert!(matches!(vis_ybr_cube(&image, &config, &mut surface), Err(VisError::Validation { .. })));
        assert!(matches!(
            vis_hists(&image, &HistogramConfig::default(), &mut surface),
            Err(VisError::Validation { .. })
        ));
        assert!(surface.scatters.is_empty());
        assert!(surface.histograms.is_empty());
    }
}

#[test]
fn float_above_one_rejected() {
    let image = Image::from_float_vec(1, 2, 3, vec![0.1, 0.2, 0.3, 1.5, 0.0, 0.0]).unwrap();
    let mut surface = RecordingSurface::default();

    assert!(matches!(
        vis_rgb_cube(&image, &ScatterConfig::default(), &mut surface),
        Err(VisError::Validation { .. })
    ));
    assert!(matches!(
        vis_hists(&image, &HistogramConfig::default(), &mut surface),
        Err(VisError::Validation { .. })
    ));
}

#[test]
fn every_space_renders_to_raster() {
    let image = noise_image(16, 16, 1);
    let config = ScatterConfig::default().with_sample_count(64).with_seed(4);
    let mut surface = RasterSurface::new(RenderConfig::default()).unwrap();

    assert_eq!(vis_rgb_cube(&image, &config, &mut surface).unwrap().len(), 64);
    assert_eq!(vis_hsv_cube(&image, &config, &mut surface).unwrap().len(), 64);
    assert_eq!(vis_lab_cube(&image, &config, &mut surface).unwrap().len(), 64);
    assert_eq!(vis_ybr_cube(&image, &config, &mut surface).unwrap().len(), 64);

    assert_eq!(surface.canvas().dimensions(), (400, 400));

    let mut hist_surface = RasterSurface::new(RenderConfig::default().histogram_canvas()).unwrap();
    let figure = vis_hists(&image, &HistogramConfig::default(), &mut hist_surface).unwrap();
    assert_eq!(figure.edges.len(), 257);
    for counts in &figure.counts {
        assert_eq!(counts.iter().sum::<u64>(), 256);
    }
    assert_eq!(hist_surface.canvas().dimensions(), (900, 300));
}

#[test]
fn same_seed_same_sample() {
    let image = noise_image(20, 20, 9);
    let config = ScatterConfig::default().with_sample_count(30).with_seed(42);

    let a = vis_lab_cube(&image, &config, &mut RecordingSurface::default()).unwrap();
    let b = vis_lab_cube(&image, &config, &mut RecordingSurface::default()).unwrap();
    assert_eq!(a.indices, b.indices);
}

#[test]
fn normalized_colors_share_mean_lightness() {
    let colors = vec![
        [0.9, 0.2, 0.1],
        [0.1, 0.6, 0.3],
        [0.2, 0.3, 0.8],
        [0.95, 0.9, 0.2],
        [0.4, 0.4, 0.4],
    ];
    let mean = colors.iter().map(|c| lightness(*c)).sum::<f32>() / colors.len() as f32;

    let once = lab_uniform(&colors);
    assert_eq!(once.len(), colors.len());
    for color in &once {
        assert_abs_diff_eq!(lightness(*color), mean, epsilon = 1e-4);
    }

    let twice = lab_uniform(&once);
    for (a, b) in once.iter().zip(&twice) {
        assert_abs_diff_eq!(lightness(*a), lightness(*b), epsilon = 1e-4);
    }
}

#[test]
fn red_and_green_keep_distinct_hues() {
    let result = normalize_lightness(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], PerceptualModel::CieLab);

    assert_abs_diff_eq!(lightness(result[0]), lightness(result[1]), epsilon = 1e-4);
    assert!(result[0] != result[1]);
    // red leans toward +a, green toward -a
    let [_, a_red, _] = dipvis::cst::rgb_to_lab(result[0]);
    let [_, a_green, _] = dipvis::cst::rgb_to_lab(result[1]);
    assert!(a_red > 0.0 && a_green < 0.0);
}
