use bridge_core::{
    calculate_score, Auction, Contract, GamePhase, Hand, PlayState, Seat, Side, Strain,
    Vulnerability,
};

fn dealt_hands() -> [Hand; 4] {
    [
        Hand::parse("AKQJ.T98.765.432"),
        Hand::parse("T98.765.432.AKQJ"),
        Hand::parse("765.432.AKQJ.T98"),
        Hand::parse("432.AKQJ.T98.765"),
    ]
}

#[test]
fn auction_to_played_out_deal() {
    let auction = Auction::bidding(Seat::North, "1S P 2S P P P");
    let contract = auction.determine_contract().unwrap();
    assert_eq!(contract.declarer, Seat::North);
    assert_eq!(contract.strain, Strain::Spades);

    let mut state = PlayState::new(contract, dealt_hands());
    assert_eq!(state.next_to_play, Seat::East);

    // Drive the deal to completion with a blind first-legal-card policy;
    // only the engine invariants are under test here.
    let mut plays = 0;
    while !state.is_complete() {
        let seat = state.next_to_play;
        let card = state.legal_plays(seat)[0];
        state.play_card(seat, card).unwrap();
        plays += 1;
        assert_eq!(state.cards_accounted(), 52);
    }

    assert_eq!(plays, 52);
    assert_eq!(state.tricks_played(), 13);
    assert_eq!(state.phase, GamePhase::PlayComplete);
    assert_eq!(
        state.tricks_won(Side::NS) + state.tricks_won(Side::EW),
        13
    );

    let score = calculate_score(
        &contract,
        state.declarer_tricks(),
        Vulnerability::None,
    );
    assert_eq!(score.tricks_taken, state.declarer_tricks());

    // And the caller can walk the post-play phases.
    state.advance_phase(GamePhase::Scoring).unwrap();
    state.advance_phase(GamePhase::RoundComplete).unwrap();
    state.advance_phase(GamePhase::Dealing).unwrap();
}

#[test]
fn serialized_state_round_trips() {
    let contract = Contract::new(3, Strain::NoTrump, Seat::South);
    let mut state = PlayState::new(contract, dealt_hands());
    let seat = state.next_to_play;
    let card = state.legal_plays(seat)[0];
    state.play_card(seat, card).unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let restored: PlayState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.next_to_play, state.next_to_play);
    assert_eq!(restored.current_trick, state.current_trick);
    assert_eq!(restored.cards_accounted(), 52);
}
