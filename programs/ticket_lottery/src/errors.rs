use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Operation not allowed in the current lottery state")]
    InvalidTransition,
    #[msg("Ticket is not a valid 12-digit string")]
    InvalidTicket,
    #[msg("Payment does not match the ticket price")]
    WrongPaymentAmount,
    #[msg("Request id is not pending fulfillment")]
    UnknownRequest,
    #[msg("Winner set does not match the requested count or player bounds")]
    InvalidWinnerSet,
    #[msg("Insufficient vault funds for payout")]
    InsufficientFunds,

    #[msg("Cannot settle a round with no players")]
    NoPlayers,
    #[msg("Player list is full for this round")]
    PlayerListFull,
    #[msg("An oracle request is already pending")]
    RequestAlreadyPending,
    #[msg("Retry not allowed yet (request timeout not elapsed)")]
    RetryTooEarly,

    #[msg("Invalid ticket price")]
    InvalidTicketPrice,

    #[msg("Math overflow")]
    MathOverflow,
}
