use embedded_squad::{quat::from_wxyz, SquadSegment};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

fn main() {
    let keyframes: [Quaternion<f64>; 4] = [
        from_wxyz([1., 0., 0., 0.]),
        UnitQuaternion::from_euler_angles(0., 0., 0.8).into_inner(),
        UnitQuaternion::from_euler_angles(0.3, 0.2, 1.5).into_inner(),
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.9).into_inner(),
    ];

    // Duplicate the first and last keyframe as their own outer neighbours
    let last = keyframes.len() - 1;
    let neighbour = |i: isize| &keyframes[i.clamp(0, last as isize) as usize];

    for i in 0..last as isize {
        let segment = SquadSegment::new(
            neighbour(i - 1),
            neighbour(i),
            neighbour(i + 1),
            neighbour(i + 2),
        );

        for step in 0..4 {
            let t = step as f64 / 4.;
            let attitude = UnitQuaternion::from_quaternion(segment.evaluate(t));
            let (roll, pitch, yaw) = attitude.euler_angles();
            println!(
                "segment {} t = {:.2}: roll {:7.3} pitch {:7.3} yaw {:7.3}",
                i, t, roll, pitch, yaw
            );
        }
    }

    let (roll, pitch, yaw) = UnitQuaternion::from_quaternion(keyframes[last]).euler_angles();
    println!("end: roll {:7.3} pitch {:7.3} yaw {:7.3}", roll, pitch, yaw);
}
