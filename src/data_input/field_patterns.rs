// src/data_input/field_patterns.rs

// Header label patterns for every semantic channel, most specific first.
// Capture-software versions differ in naming; both the short form
// ("Hand/Index/Base/Right X") and the category path form
// ("/Feature/Hand/Index/Base/Right X") occur. The exporter labels speed
// magnitude columns "v(绝对值)" ("absolute value").

pub type FieldPatterns = (&'static str, &'static [&'static str]);

pub const COG_X: &str = "COG_X";
pub const COG_Y: &str = "COG_Y";
pub const COG_Z: &str = "COG_Z";
pub const COG_VX: &str = "COG_VX";
pub const COG_VY: &str = "COG_VY";
pub const COG_VZ: &str = "COG_VZ";
pub const COG_V: &str = "COG_V";
pub const HAND_R_X: &str = "HAND_R_X";
pub const HAND_R_Y: &str = "HAND_R_Y";
pub const HAND_R_Z: &str = "HAND_R_Z";
pub const HAND_R_VX: &str = "HAND_R_VX";
pub const HAND_R_VY: &str = "HAND_R_VY";
pub const HAND_R_VZ: &str = "HAND_R_VZ";
pub const HAND_R_V: &str = "HAND_R_V";

/// Fields whose absence fails detection.
pub const CRITICAL_FIELDS: [&str; 3] = [HAND_R_X, HAND_R_Y, HAND_R_Z];

pub const FIELD_PATTERNS: &[FieldPatterns] = &[
    (COG_X, &["CenterOfGravity X", "/Calc/CenterOfGravity X"]),
    (COG_Y, &["CenterOfGravity Y", "/Calc/CenterOfGravity Y"]),
    (COG_Z, &["CenterOfGravity Z", "/Calc/CenterOfGravity Z"]),
    (COG_VX, &["CenterOfGravity v(X)", "/Calc/CenterOfGravity v(X)"]),
    (COG_VY, &["CenterOfGravity v(Y)", "/Calc/CenterOfGravity v(Y)"]),
    (COG_VZ, &["CenterOfGravity v(Z)", "/Calc/CenterOfGravity v(Z)"]),
    (COG_V, &["CenterOfGravity v(绝对值)", "/Calc/CenterOfGravity v(绝对值)"]),
    (HAND_R_X, &["Hand/Index/Base/Right X", "/Feature/Hand/Index/Base/Right X"]),
    (HAND_R_Y, &["Hand/Index/Base/Right Y", "/Feature/Hand/Index/Base/Right Y"]),
    (HAND_R_Z, &["Hand/Index/Base/Right Z", "/Feature/Hand/Index/Base/Right Z"]),
    (HAND_R_VX, &["Hand/Index/Base/Right v(X)", "/Feature/Hand/Index/Base/Right v(X)"]),
    (HAND_R_VY, &["Hand/Index/Base/Right v(Y)", "/Feature/Hand/Index/Base/Right v(Y)"]),
    (HAND_R_VZ, &["Hand/Index/Base/Right v(Z)", "/Feature/Hand/Index/Base/Right v(Z)"]),
    (HAND_R_V, &["Hand/Index/Base/Right v(绝对值)", "/Feature/Hand/Index/Base/Right v(绝对值)"]),
];

pub const JOINT_SHOULDER_R: &str = "shoulder_r";
pub const JOINT_ELBOW_R: &str = "elbow_r";
pub const JOINT_WRIST_R: &str = "wrist_r";
pub const JOINT_ANKLE_R: &str = "ankle_r";
pub const JOINT_ANKLE_L: &str = "ankle_l";

/// Skeleton joints resolve to their X column; Y and Z follow it.
pub const SKELETON_FIELD_PATTERNS: &[FieldPatterns] = &[
    ("root", &["/Joint/Root X"]),
    ("pelvis", &["/Joint/Hip/Center X", "/Joint/Pelvis X"]),
    ("spine_low", &["/Joint/Spine/Lower X", "/Joint/Spine/Low X", "/Feature/Spine/Low X"]),
    ("spine_high", &["/Joint/Spine/Upper X", "/Joint/Spine/High X", "/Feature/Spine/High X"]),
    ("torso", &["/Joint/Torso X", "/Joint/Chest X"]),
    ("neck", &["/Joint/Neck X"]),
    ("head", &["/Joint/Head X", "/Joint/Skullbase X"]),
    ("clavicle_r", &["/Joint/Clavicle/Right X", "/Feature/Clavicle/Right X", "/Joint/Clavicular/Right X"]),
    (JOINT_SHOULDER_R, &["/Joint/Shoulder/Right X"]),
    (JOINT_ELBOW_R, &["/Joint/Elbow/Right X"]),
    (JOINT_WRIST_R, &["/Joint/Wrist/Right X"]),
    ("hand_index_r", &["/Feature/Hand/Index/Base/Right X"]),
    ("hand_little_r", &["/Feature/Hand/Little/Base/Right X"]),
    ("clavicle_l", &["/Joint/Clavicle/Left X", "/Feature/Clavicle/Left X", "/Joint/Clavicular/Left X"]),
    ("shoulder_l", &["/Joint/Shoulder/Left X"]),
    ("elbow_l", &["/Joint/Elbow/Left X"]),
    ("wrist_l", &["/Joint/Wrist/Left X"]),
    ("hand_index_l", &["/Feature/Hand/Index/Base/Left X"]),
    ("hand_little_l", &["/Feature/Hand/Little/Base/Left X"]),
    ("hip_r", &["/Joint/Hip/Right X"]),
    ("knee_r", &["/Joint/Knee/Right X"]),
    (JOINT_ANKLE_R, &["/Joint/Ankle/Right X"]),
    ("foot_r", &["/Joint/Foot/Right X", "/Feature/Foot/Right X", "/Joint/Midfoot/Right X"]),
    ("hip_l", &["/Joint/Hip/Left X"]),
    ("knee_l", &["/Joint/Knee/Left X"]),
    (JOINT_ANKLE_L, &["/Joint/Ankle/Left X"]),
    ("foot_l", &["/Joint/Foot/Left X", "/Feature/Foot/Left X", "/Joint/Midfoot/Left X"]),
];


// src/data_input/field_patterns.rs
