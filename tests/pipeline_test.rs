// h36m-pose 🚀 AGPL-3.0 License

//! Integration tests for the full normalization pipeline.

use ndarray::{array, Array3};

use h36m_pose::metrics::mean_mpjpe;
use h36m_pose::processing::{center_root, post_process, preprocess, restore_root, standardize};
use h36m_pose::skeleton::{NUM_JOINTS, ROOT_INDEX};
use h36m_pose::{Annotations, CameraParameters, NormStats, PoseError, SampleMeta};

/// Synthetic 17-joint batch with enough per-coordinate variation that every
/// post-centering joint coordinate has nonzero std.
fn synthetic_batch(n: usize) -> Annotations {
    let mut pose2d = Array3::zeros((n, NUM_JOINTS, 2));
    let mut pose3d = Array3::zeros((n, NUM_JOINTS, 3));
    for i in 0..n {
        for j in 0..NUM_JOINTS {
            for c in 0..2 {
                pose2d[[i, j, c]] = 50.0 + (i as f32 + 1.0) * (j as f32) * 0.5 + c as f32;
            }
            for c in 0..3 {
                pose3d[[i, j, c]] = 100.0 + (i as f32 + 1.0) * (j as f32) + c as f32;
            }
        }
    }

    let meta = (0..n)
        .map(|i| SampleMeta {
            subject: 1,
            action: 2,
            subaction: 1,
            camera: 1,
            frame: i as u32,
        })
        .collect();

    Annotations::new(pose2d, pose3d, vec![CameraParameters::ideal()], meta).unwrap()
}

fn training_stats(batch: &Annotations) -> NormStats {
    let pose2d = center_root(&batch.pose2d, ROOT_INDEX).unwrap();
    let pose3d = center_root(&batch.pose3d, ROOT_INDEX).unwrap();
    NormStats::compute(&pose2d, &pose3d).unwrap()
}

#[test]
fn test_preprocess_shapes_and_passthrough() {
    let batch = synthetic_batch(4);
    let stats = training_stats(&batch);
    let original_meta = batch.meta.clone();

    let processed = preprocess(batch, ROOT_INDEX, Some(&stats)).unwrap();
    assert_eq!(processed.pose2d.dim(), (4, 16, 2));
    assert_eq!(processed.pose3d.dim(), (4, 16, 3));

    // Camera parameters and metadata pass through untouched.
    assert_eq!(processed.cameras, vec![CameraParameters::ideal()]);
    assert_eq!(processed.meta, original_meta);
}

#[test]
fn test_preprocess_without_normalization() {
    let batch = synthetic_batch(2);
    let centered = center_root(&batch.pose3d, ROOT_INDEX).unwrap();

    let processed = preprocess(batch, ROOT_INDEX, None).unwrap();
    assert_eq!(processed.pose3d, centered);
}

#[test]
fn test_preprocess_rejects_preprocessed_batch() {
    let batch = synthetic_batch(2);
    let stats = training_stats(&batch);

    let processed = preprocess(batch, ROOT_INDEX, Some(&stats)).unwrap();
    match preprocess(processed, ROOT_INDEX, Some(&stats)) {
        Err(PoseError::ShapeMismatch(_)) => {}
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_round_trip_recovers_original_units() {
    let batch = synthetic_batch(5);
    let stats = training_stats(&batch);
    let centered3d = center_root(&batch.pose3d, ROOT_INDEX).unwrap();

    let processed = preprocess(batch, ROOT_INDEX, Some(&stats)).unwrap();
    // Treat the normalized target as a perfect reconstruction.
    let (recon, target) =
        post_process(&processed.pose3d, &processed.pose3d, &stats).unwrap();

    assert_eq!(recon.dim(), (5, 17, 3));
    assert_eq!(recon, target);

    // Joint 0 is the re-attached root, exactly zero.
    for i in 0..5 {
        for c in 0..3 {
            assert_eq!(recon[[i, 0, c]], 0.0);
        }
    }

    // The rest matches the root-centered original within tolerance.
    let expected = restore_root(&centered3d);
    for (a, b) in recon.iter().zip(expected.iter()) {
        assert!((a - b).abs() <= 1e-4 * a.abs().max(1.0), "{a} vs {b}");
    }

    // A perfect reconstruction scores zero error in original units.
    assert!(mean_mpjpe(&recon, &target).unwrap() < 1e-6);
}

#[test]
fn test_worked_example_end_to_end() {
    // pose3d [[10, 20, 30]] (root already removed), mean [[5, 5, 5]],
    // std [[2, 2, 2]]: standardize -> [[2.5, 7.5, 12.5]] -> destandardize
    // recovers the input exactly, with a zero root re-attached.
    let pose = array![[[10.0_f32, 20.0, 30.0]]];
    let stats = NormStats::new(
        None,
        None,
        Some(array![[5.0, 5.0, 5.0]]),
        Some(array![[2.0, 2.0, 2.0]]),
    )
    .unwrap();

    let z = standardize(&pose, &stats).unwrap();
    assert_eq!(z, array![[[2.5, 7.5, 12.5]]]);

    let (recon, _) = post_process(&z, &z, &stats).unwrap();
    assert_eq!(recon, array![[[0.0, 0.0, 0.0], [10.0, 20.0, 30.0]]]);
}

#[test]
fn test_known_error_in_original_units() {
    let batch = synthetic_batch(3);
    let stats = training_stats(&batch);
    let processed = preprocess(batch, ROOT_INDEX, Some(&stats)).unwrap();

    let (recon, target) =
        post_process(&processed.pose3d, &processed.pose3d, &stats).unwrap();

    // Shift every predicted joint by 17mm in x; with the zero root pinned in
    // both arrays the 17-joint average over 16 moved joints is 16mm.
    let mut shifted = recon.clone();
    for i in 0..shifted.dim().0 {
        for j in 1..shifted.dim().1 {
            shifted[[i, j, 0]] += 17.0;
        }
    }
    let err = mean_mpjpe(&shifted, &target).unwrap();
    assert!((err - 16.0).abs() < 1e-3, "got {err}");
}
