use crate::domain::{other_seat, SeatIndex, Table};

/// Кнопка следующей раздачи: первая раздача – место 0, дальше по очереди.
pub fn next_button(table: &Table) -> SeatIndex {
    match table.button {
        Some(button) => other_seat(button),
        None => 0,
    }
}

/// Кто открывает торги на улице: кнопка, а если она не может ставить – соперник.
pub fn first_to_act(table: &Table) -> Option<SeatIndex> {
    let button = table.button?;
    [button, other_seat(button)]
        .into_iter()
        .find(|&seat| table.seats[seat as usize].can_act())
}

/// Ход строго чередуется; если соседу ходить нельзя, очередь остаётся у `after`.
pub fn next_to_act(table: &Table, after: SeatIndex) -> Option<SeatIndex> {
    [other_seat(after), after]
        .into_iter()
        .find(|&seat| table.seats[seat as usize].can_act())
}
