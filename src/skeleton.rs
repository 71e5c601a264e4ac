// h36m-pose 🚀 AGPL-3.0 License

//! Human3.6M skeleton definition.
//!
//! Joint ordering follows the 17-joint annotation layout used by the H36M
//! extraction stage, with the Pelvis (root) at index 0. All index tables in
//! this module are derived from that ordering and must stay in sync with it.

/// Number of joints in the full annotated skeleton (root included).
pub const NUM_JOINTS: usize = 17;

/// Number of joints after root removal.
pub const NUM_MOVABLE_JOINTS: usize = NUM_JOINTS - 1;

/// Index of the root joint (Pelvis) in the 17-joint layout.
pub const ROOT_INDEX: usize = 0;

/// Joint names in annotation order.
pub const JOINT_NAMES: [&str; NUM_JOINTS] = [
    "Pelvis",
    "R_Hip",
    "R_Knee",
    "R_Ankle",
    "L_Hip",
    "L_Knee",
    "L_Ankle",
    "Torso",
    "Neck",
    "Nose",
    "Head",
    "L_Shoulder",
    "L_Elbow",
    "L_Wrist",
    "R_Shoulder",
    "R_Elbow",
    "R_Wrist",
];

/// Bone connectivity as (parent, child) joint index pairs, 17-joint layout.
pub const SKELETON: [(usize, usize); 16] = [
    (0, 7),   // Pelvis - Torso
    (7, 8),   // Torso - Neck
    (8, 9),   // Neck - Nose
    (9, 10),  // Nose - Head
    (8, 11),  // Neck - L_Shoulder
    (11, 12), // L_Shoulder - L_Elbow
    (12, 13), // L_Elbow - L_Wrist
    (8, 14),  // Neck - R_Shoulder
    (14, 15), // R_Shoulder - R_Elbow
    (15, 16), // R_Elbow - R_Wrist
    (0, 1),   // Pelvis - R_Hip
    (1, 2),   // R_Hip - R_Knee
    (2, 3),   // R_Knee - R_Ankle
    (0, 4),   // Pelvis - L_Hip
    (4, 5),   // L_Hip - L_Knee
    (5, 6),   // L_Knee - L_Ankle
];

/// Left/right joint permutation for the 16-joint (root-removed) layout.
///
/// `pose[FLIP_INDICES_16[i]]` is the mirror partner of joint `i`. Midline
/// joints map to themselves.
pub const FLIP_INDICES_16: [usize; NUM_MOVABLE_JOINTS] = [
    3, 4, 5, // R hip/knee/ankle <- L
    0, 1, 2, // L hip/knee/ankle <- R
    6, 7, 8, 9, // Torso, Neck, Nose, Head
    13, 14, 15, // L shoulder/elbow/wrist <- R
    10, 11, 12, // R shoulder/elbow/wrist <- L
];

/// Human3.6M action names, indexed by `action_id - 2` (ids run 2..=16).
pub const ACTION_NAMES: [&str; 15] = [
    "Directions",
    "Discussion",
    "Eating",
    "Greeting",
    "Phoning",
    "Posing",
    "Purchases",
    "Sitting",
    "SittingDown",
    "Smoking",
    "TakingPhoto",
    "Waiting",
    "Walking",
    "WalkingDog",
    "WalkTogether",
];

/// Look up a joint index by name.
#[must_use]
pub fn joint_index(name: &str) -> Option<usize> {
    JOINT_NAMES.iter().position(|&n| n == name)
}

/// Look up the action name for an H36M action id (2..=16).
#[must_use]
pub fn action_name(action_id: u32) -> Option<&'static str> {
    if (2..=16).contains(&action_id) {
        Some(ACTION_NAMES[(action_id - 2) as usize])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_pelvis() {
        assert_eq!(JOINT_NAMES[ROOT_INDEX], "Pelvis");
        assert_eq!(joint_index("Pelvis"), Some(ROOT_INDEX));
    }

    #[test]
    fn test_flip_is_involution() {
        for (i, &j) in FLIP_INDICES_16.iter().enumerate() {
            assert_eq!(FLIP_INDICES_16[j], i, "flip table not symmetric at {i}");
        }
    }

    #[test]
    fn test_flip_swaps_sides() {
        // 16-joint indices are the 17-joint indices minus one.
        let r_hip = joint_index("R_Hip").unwrap() - 1;
        let l_hip = joint_index("L_Hip").unwrap() - 1;
        assert_eq!(FLIP_INDICES_16[r_hip], l_hip);

        let neck = joint_index("Neck").unwrap() - 1;
        assert_eq!(FLIP_INDICES_16[neck], neck);
    }

    #[test]
    fn test_skeleton_indices_in_range() {
        for &(a, b) in &SKELETON {
            assert!(a < NUM_JOINTS);
            assert!(b < NUM_JOINTS);
        }
    }

    #[test]
    fn test_action_names() {
        assert_eq!(action_name(2), Some("Directions"));
        assert_eq!(action_name(16), Some("WalkTogether"));
        assert_eq!(action_name(1), None);
        assert_eq!(action_name(17), None);
    }
}
