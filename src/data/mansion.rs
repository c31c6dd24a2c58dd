//! The mansion map
//!
//! A fixed binary tree of rooms rooted at the Hall. Rooms own their children
//! outright; the player's position is kept outside the map as a path of
//! left/right turns from the Hall.

use super::SuspectIndex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the entrance room
pub const HALL: &str = "Hall";

/// Everyone who can be accused, in the order they are introduced
pub const SUSPECTS: [&str; 4] = ["Senhora", "Empregado", "Chef", "Mordomo"];

/// Which door to take out of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A room of the mansion
#[derive(Debug)]
pub struct Room {
    name: String,
    clue: Option<String>,
    implicated_suspect: Option<String>,
    left: Option<Box<Room>>,
    right: Option<Box<Room>>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clue still waiting in this room, if it has not been collected
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn implicated_suspect(&self) -> Option<&str> {
        self.implicated_suspect.as_deref()
    }

    /// Search the room. The clue is handed over once; after that the room is
    /// empty for good.
    pub fn visit(&mut self) -> Option<String> {
        self.clue.take()
    }

    pub fn child(&self, direction: Direction) -> Option<&Room> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    pub fn child_mut(&mut self, direction: Direction) -> Option<&mut Room> {
        match direction {
            Direction::Left => self.left.as_deref_mut(),
            Direction::Right => self.right.as_deref_mut(),
        }
    }

    /// Doors out of this room and the rooms they lead to
    pub fn exits(&self) -> Vec<(Direction, &str)> {
        [Direction::Left, Direction::Right]
            .into_iter()
            .filter_map(|direction| self.child(direction).map(|room| (direction, room.name())))
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn with_left(mut self, room: Room) -> Self {
        self.left = Some(Box::new(room));
        self
    }

    fn with_right(mut self, room: Room) -> Self {
        self.right = Some(Box::new(room));
        self
    }
}

/// Creates rooms and registers their clues in the suspect index in the same
/// step, so no room can hold a clue the index does not know about.
struct RoomMaker<'a> {
    index: &'a mut SuspectIndex,
    made: usize,
}

impl RoomMaker<'_> {
    fn empty(&mut self, name: &str) -> Room {
        self.made += 1;
        Room {
            name: name.to_string(),
            clue: None,
            implicated_suspect: None,
            left: None,
            right: None,
        }
    }

    fn with_clue(&mut self, name: &str, clue: &str, suspect: &str) -> Room {
        self.index.insert(clue, suspect);
        let mut room = self.empty(name);
        room.clue = Some(clue.to_string());
        room.implicated_suspect = Some(suspect.to_string());
        room
    }
}

/// The mansion: a fixed tree of rooms
#[derive(Debug)]
pub struct MansionMap {
    root: Option<Box<Room>>,
    rooms: usize,
}

impl MansionMap {
    /// Build the mansion and fill the suspect index with its clues.
    ///
    /// ```text
    ///                    Hall
    ///              /              \
    ///       Living Room          Kitchen
    ///        /      \            /     \
    ///    Library   Garden    Pantry  Dining Room
    ///     /
    ///  Office
    /// ```
    pub fn build(index: &mut SuspectIndex) -> Self {
        let mut maker = RoomMaker { index, made: 0 };

        let office = maker.with_clue("Office", "Uma luva de seda preta no chao.", "Mordomo");
        let library = maker
            .with_clue("Library", "Uma pagina de diario com data rasgada.", "Senhora")
            .with_left(office);
        let garden = maker.empty("Garden");
        let living_room = maker
            .with_clue("Living Room", "A maça mordida tinha batom vermelho.", "Senhora")
            .with_left(library)
            .with_right(garden);

        let pantry = maker.with_clue("Pantry", "O cofre estava aberto e vazio.", "Empregado");
        let dining_room =
            maker.with_clue("Dining Room", "Havia um forte cheiro de cigarro barato.", "Mordomo");
        let kitchen = maker
            .with_clue("Kitchen", "A faca sumiu, mas o chef nao se lembra.", "Chef")
            .with_left(pantry)
            .with_right(dining_room);

        let hall = maker
            .with_clue(HALL, "Encontrado um ticket de onibus na lareira.", "Empregado")
            .with_left(living_room)
            .with_right(kitchen);

        let rooms = maker.made;
        debug!(rooms, "mansion built");
        Self {
            root: Some(Box::new(hall)),
            rooms,
        }
    }

    pub fn root(&self) -> Option<&Room> {
        self.root.as_deref()
    }

    /// Follow a path of turns from the Hall
    pub fn room(&self, path: &[Direction]) -> Option<&Room> {
        let mut room = self.root.as_deref()?;
        for &direction in path {
            room = room.child(direction)?;
        }
        Some(room)
    }

    pub fn room_mut(&mut self, path: &[Direction]) -> Option<&mut Room> {
        let mut room = self.root.as_deref_mut()?;
        for &direction in path {
            room = room.child_mut(direction)?;
        }
        Some(room)
    }

    /// Number of rooms still standing
    pub fn len(&self) -> usize {
        self.rooms
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Release every room, children before parents. Returns how many were
    /// released.
    pub fn teardown(&mut self) -> usize {
        fn release(mut room: Box<Room>) -> usize {
            let mut released = 0;
            if let Some(left) = room.left.take() {
                released += release(left);
            }
            if let Some(right) = room.right.take() {
                released += release(right);
            }
            drop(room);
            released + 1
        }

        let released = self.root.take().map_or(0, release);
        self.rooms = 0;
        debug!(released, "mansion released");
        released
    }
}
