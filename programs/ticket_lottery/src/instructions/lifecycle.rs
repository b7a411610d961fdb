use anchor_lang::prelude::*;

use anchor_spl::token::{self, Transfer};

use crate::events::{LotteryOpened, OracleRequested, RequestRetried};
use crate::state::RequestKind;
use crate::utils::{end_core, issue_request_core, retry_core, start_core};
use crate::{EndLottery, RetryOracleRequest, StartLottery, LOTTERY_SEED};

pub fn start_lottery(ctx: Context<StartLottery>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    start_core(lottery, ctx.accounts.authority.key())?;

    emit!(LotteryOpened {
        round: lottery.round,
        authority: lottery.authority,
    });

    Ok(())
}

pub fn end_lottery(ctx: Context<EndLottery>) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let request_key = ctx.accounts.oracle_request.key();
    let current_slot = Clock::get()?.slot;

    let lottery = &mut ctx.accounts.lottery;
    end_core(lottery, ctx.accounts.authority.key())?;
    let issued = issue_request_core(lottery, lottery_key, request_key, RequestKind::WinnerCount)?;

    let round = lottery.round;
    let fee = lottery.oracle_fee;
    let lottery_bump = lottery.bump;

    let request = &mut ctx.accounts.oracle_request;
    request.lottery = lottery_key;
    request.bump = ctx.bumps.oracle_request;
    request.request_id = issued.request_id;
    request.kind = RequestKind::WinnerCount as u8;
    request.job = issued.job;
    request.param_count = issued.param_count;
    request.nonce = issued.nonce;
    request.created_slot = current_slot;

    if fee > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[LOTTERY_SEED, &[lottery_bump]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.fee_vault.to_account_info(),
                    to: ctx.accounts.oracle_fee_account.to_account_info(),
                    authority: ctx.accounts.lottery.to_account_info(),
                },
                signer_seeds,
            ),
            fee,
        )?;
    }

    emit!(OracleRequested {
        round,
        request: request_key,
        request_id: issued.request_id,
        kind: RequestKind::WinnerCount as u8,
        job: issued.job,
        param_count: issued.param_count,
        fee,
    });

    Ok(())
}

pub fn retry_oracle_request(ctx: Context<RetryOracleRequest>, request_id: [u8; 32]) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let stale_key = ctx.accounts.oracle_request.key();
    let next_key = ctx.accounts.next_request.key();
    let current_slot = Clock::get()?.slot;

    let lottery = &mut ctx.accounts.lottery;
    let kind = retry_core(
        lottery,
        ctx.accounts.authority.key(),
        &ctx.accounts.oracle_request,
        stale_key,
        request_id,
        current_slot,
    )?;

    // Reissue the same phase under a fresh id.
    let issued = issue_request_core(lottery, lottery_key, next_key, kind)?;

    let round = lottery.round;
    let fee = lottery.oracle_fee;
    let lottery_bump = lottery.bump;

    let next = &mut ctx.accounts.next_request;
    next.lottery = lottery_key;
    next.bump = ctx.bumps.next_request;
    next.request_id = issued.request_id;
    next.kind = kind as u8;
    next.job = issued.job;
    next.param_count = issued.param_count;
    next.nonce = issued.nonce;
    next.created_slot = current_slot;

    if fee > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[LOTTERY_SEED, &[lottery_bump]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.fee_vault.to_account_info(),
                    to: ctx.accounts.oracle_fee_account.to_account_info(),
                    authority: ctx.accounts.lottery.to_account_info(),
                },
                signer_seeds,
            ),
            fee,
        )?;
    }

    msg!("Oracle request reissued at nonce {}", issued.nonce);

    emit!(RequestRetried {
        round,
        stale_request_id: request_id,
        new_request_id: issued.request_id,
    });
    emit!(OracleRequested {
        round,
        request: next_key,
        request_id: issued.request_id,
        kind: kind as u8,
        job: issued.job,
        param_count: issued.param_count,
        fee,
    });

    // The stale request account is closed to the authority by the context.
    Ok(())
}
