use kmeans_visualizer::{
    codec, resolution, sampler, segmenter, DistanceFunction, DistributionSpec, NearestCentroid, Point,
    SquaredEuclideanDistance
};
use proptest::prelude::*;
use rand::prelude::*;

fn point() -> impl Strategy<Value = Point<f64>> {
    (-1.0e4f64..1.0e4, -1.0e4f64..1.0e4).prop_map(|(x, y)| Point::new(x, y))
}

/// A line that never parses as a point.
fn malformed_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-z]{1,8}",
        "[p-z]{1,4}, [0-9]{1,3}",
        "[\"p-z, ]{1,8}",
        Just("\"oops".to_string()),
        r#""[0-9]{1,3}\.[0-9]{1,6}, [0-9]{1,3}"#,
        (-100.0f64..100.0).prop_map(|v| format!("{}", v)),
        (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0).prop_map(|(a, b, c)| format!("{}, {}, {}", a, b, c)),
    ]
}

proptest! {
    #[test]
    fn prop_sampler_counts(counts in prop::collection::vec(0usize..50, 0..6), seed in any::<u64>()) {
        let specs: Vec<_> = counts.iter().enumerate()
            .map(|(i, &c)| DistributionSpec::new((i as f64 * 1000.0, 0.0), (0.5, 0.5), c))
            .collect();
        let observations = sampler::sample(&specs, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(observations.len(), counts.iter().sum::<usize>());

        // components are far apart: count each component's subsequence by position
        let mut offset = 0;
        for (i, &c) in counts.iter().enumerate() {
            for p in &observations[offset..offset + c] {
                prop_assert!((p.x - i as f64 * 1000.0).abs() < 100.0);
            }
            offset += c;
        }
    }

    #[test]
    fn prop_csv_round_trip(points in prop::collection::vec(point(), 0..100)) {
        let mut buf = Vec::new();
        codec::write_points_to(&points, &mut buf).unwrap();
        let (read, skipped) = codec::read_points_from::<f64, _>(buf.as_slice());
        prop_assert_eq!(skipped, 0);
        prop_assert_eq!(read.len(), points.len());
        for (r, p) in read.iter().zip(points.iter()) {
            prop_assert!((r.x - p.x).abs() <= 5.1e-7);
            prop_assert!((r.y - p.y).abs() <= 5.1e-7);
        }
    }

    #[test]
    fn prop_csv_tolerance(lines in prop::collection::vec(
        prop_oneof![point().prop_map(Ok::<Point<f64>, String>), malformed_line().prop_map(Err::<Point<f64>, String>)], 0..60)
    ) {
        let mut text = String::new();
        let mut expected = Vec::new();
        for line in &lines {
            match line {
                Ok(p) => {
                    text.push_str(&format!("{:.6}, {:.6}\n", p.x, p.y));
                    expected.push(Point::new(format!("{:.6}", p.x).parse::<f64>().unwrap(), format!("{:.6}", p.y).parse::<f64>().unwrap()));
                },
                Err(garbage) => {
                    text.push_str(garbage);
                    text.push('\n');
                }
            }
        }
        let (read, _) = codec::read_points_from::<f64, _>(text.as_bytes());
        prop_assert_eq!(read, expected);
    }

    #[test]
    fn prop_segmentation(stream in prop::collection::vec(point(), 0..100), k in 1usize..10) {
        let iterations = segmenter::segment(&stream, k).unwrap();
        prop_assert_eq!(iterations.len(), stream.len() / k);
        for (i, iteration) in iterations.iter().enumerate() {
            prop_assert_eq!(*iteration, &stream[i * k..(i + 1) * k]);
        }
    }

    #[test]
    fn prop_nearest_centroid(
        observations in prop::collection::vec(point(), 0..50),
        centroids in prop::collection::vec(point(), 1..8)
    ) {
        let result = NearestCentroid::new(SquaredEuclideanDistance).assign(&observations, &centroids).unwrap();
        prop_assert_eq!(result.assignments.len(), observations.len());
        for (o, &assigned) in observations.iter().zip(result.assignments.iter()) {
            prop_assert!(assigned < centroids.len());
            let best = SquaredEuclideanDistance.distance(o, &centroids[assigned]);
            for (idx, c) in centroids.iter().enumerate() {
                let dist = SquaredEuclideanDistance.distance(o, c);
                prop_assert!(best <= dist);
                if idx < assigned {
                    prop_assert!(best < dist);
                }
            }
        }
    }

    #[test]
    fn prop_export_scaling(target in 1u32..4000, w in 0.1f64..50.0, h in 0.1f64..50.0) {
        let dpi = resolution(target, (w, h));
        prop_assert!((dpi - target as f64 / w.max(h)).abs() < 1e-9);
        prop_assert!((w.max(h) * dpi - target as f64).abs() < 1e-6);
    }
}

#[test]
fn classifier_scenario() {
    let iteration = [Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(-10.0, -10.0)];
    let observation = [Point::new(1.0, 1.0)];
    let result = NearestCentroid::new(SquaredEuclideanDistance).assign(&observation, &iteration).unwrap();
    assert_eq!(result.assignments, vec![0]);
    assert_eq!(result.centroid_distances, vec![2.0]);
}
