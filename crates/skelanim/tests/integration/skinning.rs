//! Skinning matrix generation on posed skeletons

use glam::{Mat4, Vec3};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use skelanim::{
    AnimError, BoneMatrixGenerator, InverseBindMatrixGenerator, Model, Skeleton, Skinning,
    UniformGenerator,
};

use crate::common::{biped_bones, biped_model};

fn bone_y(buffer: &skelanim::MatrixBuffer, index: usize) -> f32 {
    buffer.matrix(index).unwrap().w_axis.y
}

#[test]
fn test_generators_use_independent_orders() {
    let model = biped_model();
    let model = model.borrow();

    // Bone matrices by idx: hips, spine, head
    let bones = BoneMatrixGenerator.compute(&model).unwrap();
    assert_eq!(bones.len(), 3);
    assert_eq!(
        (0..3).map(|i| bone_y(&bones, i)).collect::<Vec<_>>(),
        vec![1.0, 2.0, 3.0]
    );

    // Inverse binds by skinning order: head, hips, spine
    let inverse = InverseBindMatrixGenerator.compute(&model).unwrap();
    let ys: Vec<f32> = (0..3).map(|i| bone_y(&inverse, i)).collect();
    for (actual, expected) in ys.iter().zip([-3.0, -1.0, -2.0]) {
        assert!((actual - expected).abs() < 1e-5, "{ys:?}");
    }
}

#[test]
fn test_bind_pose_cancels_inverse_bind() {
    let model = Model::new("Biped")
        .with_skeleton(Skeleton::new(biped_bones()).unwrap())
        .with_skinning(Skinning::new(["hips", "spine", "head"]));

    let bones = BoneMatrixGenerator.compute(&model).unwrap();
    let inverse = InverseBindMatrixGenerator.compute(&model).unwrap();
    for (pose, inverse_bind) in bones.matrices().zip(inverse.matrices()) {
        assert!((pose * inverse_bind).abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }
}

#[test]
fn test_errors_carry_model_name() {
    let model = Model::new("Ghost");
    let err = BoneMatrixGenerator.compute(&model).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to compute bone matrices without a skeleton attached to model 'Ghost'"
    );

    let model = Model::new("Ghost").with_skeleton(Skeleton::new(biped_bones()).unwrap());
    assert_eq!(
        InverseBindMatrixGenerator.compute(&model),
        Err(AnimError::MissingSkinning {
            model: "Ghost".to_string()
        })
    );
}

fn shuffled(order: &[usize]) -> Model {
    let bones = biped_bones();
    let skeleton = Skeleton::new(order.iter().map(|&i| bones[i].clone()).collect()).unwrap();
    Model::new("Shuffled")
        .with_skeleton(skeleton)
        .with_skinning(Skinning::new(["spine", "head", "hips"]))
}

proptest! {
    #[test]
    fn test_ordering_stable_under_bone_reordering(
        order in Just(vec![0usize, 1, 2]).prop_shuffle()
    ) {
        let reference = shuffled(&[0, 1, 2]);
        let model = shuffled(&order);

        prop_assert_eq!(
            BoneMatrixGenerator.compute(&model).unwrap(),
            BoneMatrixGenerator.compute(&reference).unwrap()
        );
        prop_assert_eq!(
            InverseBindMatrixGenerator.compute(&model).unwrap(),
            InverseBindMatrixGenerator.compute(&reference).unwrap()
        );
    }
}

#[test]
fn test_matrix_layout_is_column_major() {
    let model = biped_model();
    let buffer = BoneMatrixGenerator.compute(&model.borrow()).unwrap();
    let hips = &buffer.as_slice()[..16];
    assert_eq!(&hips[12..16], &[0.0, 1.0, 0.0, 1.0]);
    assert_eq!(Vec3::from_slice(&hips[12..15]), Vec3::Y);
}
