use std::cell::RefCell;
use std::rc::Rc;
use tile_pathfinding::{
    FollowStatus, GridLayout, GridModel, PathFollower, PathRequestQueue, Pathfinder, WorldPoint,
};

// Three agents request paths to the same target. The queue runs one search per tick
// and each agent starts walking once its callback has fired.
fn main() {
    let grid = GridModel::from_ascii(
        "
        ..........
        .######...
        .#....#...
        .#.33.#...
        .#....####
        .#........
        ..........
        ",
        GridLayout::new(WorldPoint::new(-5.0, -3.5), 1.0),
    )
    .unwrap();
    let pathfinder = Pathfinder::default();
    let target = WorldPoint::new(4.5, -3.0);
    let starts = [
        WorldPoint::new(-4.5, -3.0),
        WorldPoint::new(4.5, 3.0),
        WorldPoint::new(-2.5, 0.0),
    ];

    let followers: Vec<Rc<RefCell<PathFollower>>> = starts
        .iter()
        .map(|s| Rc::new(RefCell::new(PathFollower::new(*s, Vec::new()))))
        .collect();
    let mut queue = PathRequestQueue::new();
    for (id, (start, follower)) in starts.iter().zip(&followers).enumerate() {
        let follower = Rc::clone(follower);
        queue.request_path(*start, target, move |_, waypoints, success| {
            println!("Agent {id}: success {success}, {} waypoints", waypoints.len());
            if success {
                follower.borrow_mut().set_path(waypoints);
            }
        });
    }

    let mut tick = 0;
    loop {
        queue.tick(&pathfinder, &grid);
        let arrived = followers
            .iter()
            .filter(|f| f.borrow_mut().advance(0.5) == FollowStatus::Arrived)
            .count();
        tick += 1;
        if queue.is_idle() && arrived == followers.len() {
            break;
        }
    }
    println!("All agents arrived after {tick} ticks");
    for (id, follower) in followers.iter().enumerate() {
        println!("Agent {id} at {}", follower.borrow().position());
    }
}
