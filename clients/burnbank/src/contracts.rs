//! Contract interfaces generated via alloy's sol! macro.

use alloy::sol;

sol! {
    // Burn bank: stakes a token, burns part of it and pays a native-currency jackpot per epoch
    #[sol(rpc)]
    interface IBurnBank {
        function epochInterval() external view returns (uint16);
        function startBlock() external view returns (uint256);
        function totalGvn() external view returns (uint256);
        function totalBurned() external view returns (uint256);
        function totalStk() external view returns (uint256);
        function tokenAddr() external view returns (address);
        function pool() external view returns (address);
        function tp() external view returns (address);
        function v2() external view returns (bool);
        function userStks(address user) external view returns (uint256);
        function declines(address user) external view returns (bool);
        function burnFactor() external view returns (uint16);
        function donationPrc() external view returns (uint16);
        function dest() external view returns (address);
        function burnDest() external view returns (address);

        function stake(uint256 amt) external;
        function withdraw(uint256 amt) external;
        function give() external payable;
        function allow() external;
        function decline() external;
    }

    #[sol(rpc)]
    interface IBurnBankFactory {
        function count() external view returns (uint256);
        function created(uint256 index) external view returns (address);
    }

    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    // Chainlink AggregatorV3
    #[sol(rpc)]
    interface IAggregatorV3 {
        function decimals() external view returns (uint8);
        function latestRoundData() external view returns (
            uint80 roundId,
            int256 answer,
            uint256 startedAt,
            uint256 updatedAt,
            uint80 answeredInRound
        );
    }

    // Token price helper: price of one whole token in wei, read from a Uniswap v3 pool or v2 pair
    #[sol(rpc)]
    interface ITokenPrice {
        function price(address pool) external view returns (uint256);
        function priceV2(address pair) external view returns (uint256);
    }
}
