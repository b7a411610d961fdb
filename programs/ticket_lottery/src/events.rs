use anchor_lang::prelude::*;

#[event]
pub struct LotteryOpened {
    pub round: u64,
    pub authority: Pubkey,
}

#[event]
pub struct EntryAccepted {
    pub round: u64,
    pub player: Pubkey,
    pub entry_index: u32,
    pub ticket: String,
    pub pot_balance: u64,
}

#[event]
pub struct PotFunded {
    pub round: u64,
    pub funder: Pubkey,
    pub amount: u64,
    pub pot_balance: u64,
}

#[event]
pub struct OracleRequested {
    pub round: u64,
    pub request: Pubkey,
    pub request_id: [u8; 32],
    pub kind: u8,
    pub job: [u8; 32],
    pub param_count: u8,
    pub fee: u64,
}

#[event]
pub struct WinnerCountReceived {
    pub round: u64,
    pub request_id: [u8; 32],
    pub count: u8,
}

#[event]
pub struct WinnersSettled {
    pub round: u64,
    pub request_id: [u8; 32],
    pub first_winner: Pubkey,
    pub second_winner: Pubkey,
    pub third_winner: Pubkey,
    pub first_prize: u64,
    pub second_prize: u64,
    pub third_prize: u64,
    pub pot_total: u64,
}

#[event]
pub struct RequestRetried {
    pub round: u64,
    pub stale_request_id: [u8; 32],
    pub new_request_id: [u8; 32],
}

#[event]
pub struct OracleAuthorityUpdated {
    pub old_oracle: Pubkey,
    pub new_oracle: Pubkey,
}
